// Fun commands: eightball, coinflip, roll, and a multiple-choice quiz that
// runs through the selection prompt.

use crate::core::dispatch::{
    CommandError, ReplyMessage, SelectMenuSpec, SelectOptionSpec,
};
use crate::core::registry::{Category, CommandDescriptor, ParamKind, ParamSpec};
use crate::core::selection::Resolution;
use crate::discord::commands::CommandCtx;
use crate::discord::selection::run_prompt;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const QUIZ_DEADLINE: Duration = Duration::from_secs(30);

const EIGHTBALL_ANSWERS: &[&str] = &[
    "It is certain.",
    "Without a doubt.",
    "Most likely.",
    "Signs point to yes.",
    "Reply hazy, try again.",
    "Ask again later.",
    "Better not tell you now.",
    "Don't count on it.",
    "My sources say no.",
    "Very doubtful.",
];

pub fn eightball_descriptor() -> CommandDescriptor {
    CommandDescriptor::new("eightball", "Ask the magic 8-ball a question.", Category::Fun).param(
        ParamSpec::required("question", "What do you want to know?", ParamKind::String),
    )
}

pub async fn eightball(cx: &CommandCtx) -> Result<(), CommandError> {
    let question = cx
        .invocation
        .str_opt("question")
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| CommandError::validation("Ask an actual question."))?;

    let answer = EIGHTBALL_ANSWERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Ask again later.");

    cx.reply
        .say(format!("🎱 *{question}*\n**{answer}**"))
        .await?;
    Ok(())
}

pub fn coinflip_descriptor() -> CommandDescriptor {
    CommandDescriptor::new("coinflip", "Flip a coin.", Category::Fun)
}

pub async fn coinflip(cx: &CommandCtx) -> Result<(), CommandError> {
    let side = if rand::thread_rng().gen_bool(0.5) {
        "Heads"
    } else {
        "Tails"
    };
    cx.reply.say(format!("🪙 **{side}**!")).await?;
    Ok(())
}

pub const MIN_SIDES: i64 = 2;
pub const MAX_SIDES: i64 = 1000;

pub fn roll_descriptor() -> CommandDescriptor {
    CommandDescriptor::new("roll", "Roll a die.", Category::Fun).param(ParamSpec::optional(
        "sides",
        "Number of sides (default 6)",
        ParamKind::Integer,
    ))
}

pub async fn roll(cx: &CommandCtx) -> Result<(), CommandError> {
    let sides = cx.invocation.int_opt("sides").unwrap_or(6);
    if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
        return Err(CommandError::validation(format!(
            "Sides must be between {MIN_SIDES} and {MAX_SIDES}."
        )));
    }

    let rolled = rand::thread_rng().gen_range(1..=sides);
    cx.reply
        .say(format!("🎲 Rolled a d{sides}: **{rolled}**"))
        .await?;
    Ok(())
}

struct QuizQuestion {
    prompt: &'static str,
    options: [&'static str; 4],
    answer: usize,
}

const QUIZ_QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        prompt: "Which planet has the most moons?",
        options: ["Earth", "Mars", "Saturn", "Mercury"],
        answer: 2,
    },
    QuizQuestion {
        prompt: "What is the largest ocean on Earth?",
        options: ["Atlantic", "Pacific", "Indian", "Arctic"],
        answer: 1,
    },
    QuizQuestion {
        prompt: "Which metal is liquid at room temperature?",
        options: ["Tin", "Lead", "Mercury", "Zinc"],
        answer: 2,
    },
    QuizQuestion {
        prompt: "How many legs does a spider have?",
        options: ["Six", "Eight", "Ten", "Twelve"],
        answer: 1,
    },
    QuizQuestion {
        prompt: "What gas do plants absorb from the air?",
        options: ["Oxygen", "Nitrogen", "Hydrogen", "Carbon dioxide"],
        answer: 3,
    },
];

pub fn quiz_descriptor() -> CommandDescriptor {
    CommandDescriptor::new("quiz", "Answer a quick trivia question.", Category::Fun)
}

pub async fn quiz(cx: &CommandCtx) -> Result<(), CommandError> {
    let question = &QUIZ_QUESTIONS[rand::thread_rng().gen_range(0..QUIZ_QUESTIONS.len())];
    let correct = question.options[question.answer];

    let content = format!(
        "❓ **{}**\nYou have {} seconds.",
        question.prompt,
        QUIZ_DEADLINE.as_secs()
    );
    let menu = SelectMenuSpec {
        custom_id: "quiz_answer".to_string(),
        placeholder: "Pick your answer".to_string(),
        options: question
            .options
            .iter()
            .map(|option| SelectOptionSpec {
                label: option.to_string(),
                value: option.to_string(),
                description: None,
            })
            .collect(),
        disabled: false,
    };

    match run_prompt(cx, &content, menu, QUIZ_DEADLINE).await? {
        Resolution::TimedOut => {
            cx.reply
                .edit(ReplyMessage::text(format!(
                    "⏱️ Time's up! The answer was **{correct}**."
                )))
                .await?;
            Ok(())
        }
        Resolution::Selected(picked) => {
            let verdict = if picked == correct {
                format!("✅ **{picked}** is right!")
            } else {
                format!("❌ **{picked}** is wrong - it was **{correct}**.")
            };
            cx.reply
                .edit(ReplyMessage::text(format!("❓ {}\n{verdict}", question.prompt)))
                .await?;
            Ok(())
        }
    }
}
