//! # Fallback Replies
//!
//! Local replies used when the completion endpoint can't be reached.
//!
//! The text is lower-cased, then tested for keyword substrings against an
//! ordered list of rules. "hi" must start a word, so "this" and "which" are
//! not greetings. The first rule that matches wins, so the order in [`RULES`]
//! is part of the observable behaviour. Text that matches nothing
//! gets one of [`TEMPLATES`], picked by an injected [`RandomSource`], with the
//! user's original text embedded verbatim.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Category of a keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    Greeting,
    HowAreYou,
    Help,
    Thanks,
    NameQuery,
    Farewell,
}

/// How a single keyword is compared against the lower-cased text.
#[derive(Debug, Clone, Copy)]
enum Keyword {
    /// Anywhere in the text ("hello" matches "hellooo").
    Contains(&'static str),
    /// Anywhere a word begins ("hi" matches "hii" but not "this").
    WordStart(&'static str),
    /// Both keywords must be present.
    Both(&'static Keyword, &'static Keyword),
}

struct Rule {
    kind: FallbackKind,
    keywords: &'static [Keyword],
    reply: &'static str,
}

const WHAT: Keyword = Keyword::Contains("what");
const NAME: Keyword = Keyword::Contains("name");

/// Evaluated top to bottom; first match wins.
const RULES: &[Rule] = &[
    Rule {
        kind: FallbackKind::Greeting,
        keywords: &[
            Keyword::Contains("hello"),
            Keyword::WordStart("hi"),
            Keyword::Contains("hey"),
            Keyword::Contains("howdy"),
            Keyword::Contains("greetings"),
        ],
        reply: "Hello! It's great to chat with you. What's on your mind today?",
    },
    Rule {
        kind: FallbackKind::HowAreYou,
        keywords: &[
            Keyword::Contains("how are you"),
            Keyword::Contains("how do you feel"),
            Keyword::Contains("how's it going"),
        ],
        reply: "I'm doing well, thank you for asking! I'm here and ready to help. How are you doing?",
    },
    Rule {
        kind: FallbackKind::Help,
        keywords: &[Keyword::Contains("help"), Keyword::Contains("assist")],
        reply: "I'm here to help! I can answer questions, have conversations, help with problem-solving, or just chat. What would you like to explore?",
    },
    Rule {
        kind: FallbackKind::Thanks,
        keywords: &[Keyword::Contains("thank"), Keyword::WordStart("thx")],
        reply: "You're very welcome! I'm happy I could help. Is there anything else you'd like to discuss?",
    },
    Rule {
        kind: FallbackKind::NameQuery,
        keywords: &[Keyword::Both(&WHAT, &NAME), Keyword::Contains("who are you")],
        reply: "I'm your AI assistant! You can call me whatever you'd like. What would you prefer to call me?",
    },
    Rule {
        kind: FallbackKind::Farewell,
        keywords: &[Keyword::Contains("bye"), Keyword::Contains("see you")],
        reply: "Goodbye! It was lovely chatting with you. Feel free to come back anytime!",
    },
];

/// Echo templates for text that matched no rule. `{text}` is the user's input.
pub const TEMPLATES: [&str; 5] = [
    "That's interesting! Tell me more about your thoughts on \"{text}\".",
    "I can see why you're thinking about \"{text}\". What sparked this question?",
    "\"{text}\" is definitely worth exploring. What specific aspect interests you most?",
    "Thanks for bringing up \"{text}\". I'd love to dive deeper into this with you.",
    "You've touched on something important with \"{text}\". What's your experience with this?",
];

/// Source of uniform choices. Injected so tests can pin the template.
pub trait RandomSource: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG; the default in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic generator for reproducible runs.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Lower-cases the text and straightens curly apostrophes.
fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

impl Keyword {
    fn matches(&self, text: &str) -> bool {
        match self {
            Keyword::Contains(k) => text.contains(*k),
            Keyword::WordStart(k) => text.match_indices(*k).any(|(i, _)| {
                !text[..i]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphanumeric)
            }),
            Keyword::Both(a, b) => a.matches(text) && b.matches(text),
        }
    }
}

/// First rule matching the text, if any.
pub fn classify(text: &str) -> Option<FallbackKind> {
    let text = normalize(text);
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| k.matches(&text)))
        .map(|rule| rule.kind)
}

/// Canned reply for a matched category.
pub fn canned_reply(kind: FallbackKind) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.kind == kind)
        .map(|rule| rule.reply)
        .unwrap_or(TEMPLATES[0])
}

/// Renders one echo template around the original text.
pub fn templated_reply(index: usize, text: &str) -> String {
    TEMPLATES[index % TEMPLATES.len()].replace("{text}", text)
}

/// Full fallback: keyword rules first, then a random echo template.
pub fn fallback_reply(text: &str, rng: &mut dyn RandomSource) -> String {
    match classify(text) {
        Some(kind) => canned_reply(kind).to_string(),
        None => templated_reply(rng.pick(TEMPLATES.len()), text),
    }
}
