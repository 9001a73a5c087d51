// Derived grouping of descriptors by category.
//
// This is a pure function of a registry snapshot. The registry never changes
// after startup, so there is nothing to cache or invalidate - the help flow
// just rebuilds the index on each invocation.

use super::descriptor::{Category, CommandDescriptor};
use super::registry::CommandRegistry;

/// One help section: a category plus its commands in registration order.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: Category,
    pub commands: Vec<CommandDescriptor>,
}

/// Grouping of every registered descriptor by its category.
///
/// Group order is first-seen category order; order inside a group is
/// registration order. Every descriptor lands in exactly one group.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    groups: Vec<CategoryGroup>,
}

impl CategoryIndex {
    pub fn build<C>(registry: &CommandRegistry<C>) -> Self {
        let mut groups: Vec<CategoryGroup> = Vec::new();

        for descriptor in registry.descriptors() {
            match groups.iter_mut().find(|g| g.category == descriptor.category) {
                Some(group) => group.commands.push(descriptor.clone()),
                None => groups.push(CategoryGroup {
                    category: descriptor.category,
                    commands: vec![descriptor.clone()],
                }),
            }
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn group(&self, category: Category) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of grouped descriptors across all categories.
    pub fn command_count(&self) -> usize {
        self.groups.iter().map(|g| g.commands.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::CommandError;
    use crate::core::registry::registry::BoxFuture;

    fn noop(_cx: &()) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async { Ok(()) })
    }

    fn registry_with(entries: &[(&str, Category)]) -> CommandRegistry<()> {
        let mut registry = CommandRegistry::new();
        for (name, category) in entries {
            registry
                .register(CommandDescriptor::new(name, "test", *category), noop)
                .unwrap();
        }
        registry
    }

    #[test]
    fn groups_ping_and_lock_by_their_categories() {
        let registry = registry_with(&[
            ("ping", Category::Information),
            ("lock", Category::Moderation),
        ]);

        let index = CategoryIndex::build(&registry);
        assert_eq!(index.groups().len(), 2);

        let info = index.group(Category::Information).unwrap();
        let names: Vec<_> = info.commands.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ping"]);

        let moderation = index.group(Category::Moderation).unwrap();
        let names: Vec<_> = moderation.commands.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["lock"]);
    }

    #[test]
    fn every_descriptor_lands_in_exactly_one_group() {
        let registry = registry_with(&[
            ("ping", Category::Information),
            ("lock", Category::Moderation),
            ("purge", Category::Moderation),
            ("coinflip", Category::Fun),
            ("mystery", Category::Uncategorized),
        ]);

        let index = CategoryIndex::build(&registry);

        let mut all: Vec<String> = index
            .groups()
            .iter()
            .flat_map(|g| g.commands.iter().map(|d| d.name.clone()))
            .collect();
        assert_eq!(all.len(), registry.len(), "no descriptor lost or doubled");

        all.sort();
        all.dedup();
        assert_eq!(all.len(), registry.len(), "no duplicates across groups");
    }

    #[test]
    fn group_order_is_first_seen_and_inner_order_is_registration() {
        let registry = registry_with(&[
            ("lock", Category::Moderation),
            ("ping", Category::Information),
            ("purge", Category::Moderation),
            ("info", Category::Information),
        ]);

        let index = CategoryIndex::build(&registry);
        let categories: Vec<_> = index.groups().iter().map(|g| g.category).collect();
        assert_eq!(categories, vec![Category::Moderation, Category::Information]);

        let moderation: Vec<_> = index.groups()[0]
            .commands
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(moderation, vec!["lock", "purge"]);
    }

    #[test]
    fn empty_registry_builds_an_empty_index() {
        let registry: CommandRegistry<()> = CommandRegistry::new();
        let index = CategoryIndex::build(&registry);
        assert!(index.is_empty());
        assert_eq!(index.command_count(), 0);
    }
}
