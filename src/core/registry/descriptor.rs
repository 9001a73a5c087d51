// Static command declarations.
//
// A descriptor is everything the bot knows about a command *besides* its
// handler: name, description, category, and the shape of its parameters.
// Descriptors are immutable once registered; the registrar derives the
// platform registration payload from them and the help command renders them.

/// Closed set of command categories.
///
/// Categories used to be free-form strings attached to each command; that
/// made the help grouping impossible to validate. Anything that does not
/// declare a category lands in [`Category::Uncategorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Information,
    Moderation,
    Fun,
    Utility,
    Uncategorized,
}

impl Category {
    /// Stable display label, used in help output and select-menu values.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Information => "Information",
            Category::Moderation => "Moderation",
            Category::Fun => "Fun",
            Category::Utility => "Utility",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Inverse of [`Category::label`], for select-menu round-trips.
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Information" => Some(Category::Information),
            "Moderation" => Some(Category::Moderation),
            "Fun" => Some(Category::Fun),
            "Utility" => Some(Category::Utility),
            "Uncategorized" => Some(Category::Uncategorized),
            _ => None,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Uncategorized
    }
}

/// The value type a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
}

/// One declared parameter of a command or subcommand.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
        }
    }

    pub fn optional(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
        }
    }
}

/// A subcommand with its own parameter list.
///
/// Commands either take parameters directly or are a group of subcommands,
/// never both - Discord rejects mixed shapes at registration time anyway.
#[derive(Debug, Clone)]
pub struct SubcommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

/// Static declaration of a single command.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Unique, lowercase. Enforced by the registry at registration.
    pub name: String,
    pub description: &'static str,
    pub category: Category,
    pub params: Vec<ParamSpec>,
    pub subcommands: Vec<SubcommandSpec>,
    /// Restrict visibility/registration to members with moderation powers.
    pub moderator_only: bool,
}

impl CommandDescriptor {
    pub fn new(name: &str, description: &'static str, category: Category) -> Self {
        Self {
            name: name.to_lowercase(),
            description,
            category,
            params: Vec::new(),
            subcommands: Vec::new(),
            moderator_only: false,
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn subcommand(mut self, sub: SubcommandSpec) -> Self {
        self.subcommands.push(sub);
        self
    }

    pub fn moderator_only(mut self) -> Self {
        self.moderator_only = true;
        self
    }
}
