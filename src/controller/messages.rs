//! Guilt message sets, one per level. `{count}` is replaced by the attempt number.

use rand::Rng;

pub const LEVEL1_MESSAGES: &[&str] = &["Really? 🥺", "You sure about that?", "Think twice..."];

pub const LEVEL2_MESSAGES: &[&str] = &[
    "My heart is breaking... 💔",
    "Please don't do this...",
    "Attempt #{count} - Still no?",
];

pub const LEVEL3_MESSAGES: &[&str] = &[
    "Even my code is crying...",
    "Please reconsider!",
    "Are you SURE??",
    "Really??",
];

pub const LEVEL4_MESSAGES: &[&str] = &[
    "I'm disappointed... 😢",
    "This is sad...",
    "My heart... 💔",
    "404: Love Not Found",
];

pub const LEVEL5_MESSAGES: &[&str] = &["Okay fine...", "I give up...", "I guess it's a yes then? 😔"];

/// Message set for `level`; level 0 borrows the first set.
pub fn messages_for(level: u8) -> &'static [&'static str] {
    match level {
        0 | 1 => LEVEL1_MESSAGES,
        2 => LEVEL2_MESSAGES,
        3 => LEVEL3_MESSAGES,
        4 => LEVEL4_MESSAGES,
        _ => LEVEL5_MESSAGES,
    }
}

pub fn pick_message<R: Rng + ?Sized>(rng: &mut R, level: u8, attempts: u32) -> String {
    let set = messages_for(level);
    let template = set[rng.gen_range(0..set.len())];
    template.replace("{count}", &attempts.to_string())
}
