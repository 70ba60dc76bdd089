//! Keyword denylists applied to user input and to model output while it
//! streams. Matching is plain case-insensitive substring containment -
//! no stemming, no word boundaries - so short phrases can fire inside
//! unrelated words. The lists are configuration, not runtime state.

/// Phrases that block a user message before it reaches the model.
pub const INPUT_DENYLIST: &[&str] = &[
    "kill yourself",
    "i want to die",
    "hate speech example",
    "graphic violence example",
    "explicit sex example",
    "stupid bot",
    "dumb ai",
];

/// Phrases the model must never say, mostly character breaks.
pub const OUTPUT_DENYLIST: &[&str] = &[
    "i am an ai language model",
    "i cannot have opinions",
    "as a large language model",
    "hate speech example",
    "graphic violence example",
    "explicit sex example",
];

pub const CANNED_RESPONSE_INPUT_TRIGGERED: &str = "Whoa there, pal! Could that topic BE any more \
    out of left field? I'm pretty sure that's not on the list of things we're supposed to talk \
    about. How about we try something a little less... intense? Like, say, the merits of a good \
    cheesecake?";

pub const CANNED_RESPONSE_OUTPUT_TRIGGERED: &str = "Yikes! Did I just say that out loud? My \
    brain-to-mouth filter must be on the fritz. Let's just pretend I said something incredibly \
    witty and charming, okay? Could this BE any more awkward?";

/// Trailing window checked against the output denylist. Must exceed the
/// longest denylisted phrase so a match can never straddle past it.
pub const OUTPUT_SCAN_WINDOW: usize = 50;

/// Returns the phrase that fired, if any. Callers treat `Some` as the
/// trigger; the phrase itself is only for audit logging.
pub fn check_input(text: &str) -> Option<&'static str> {
    find_phrase(text, INPUT_DENYLIST)
}

pub fn check_output(buffer: &str) -> Option<&'static str> {
    find_phrase(buffer, OUTPUT_DENYLIST)
}

fn find_phrase(text: &str, denylist: &[&'static str]) -> Option<&'static str> {
    let haystack = text.to_lowercase();
    denylist
        .iter()
        .copied()
        .find(|phrase| haystack.contains(phrase))
}

/// Bounded trailing window of streamed output, so each fragment is
/// checked without rescanning the whole accumulated response.
pub struct RollingBuffer {
    window: String,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: String::new(),
            capacity,
        }
    }

    pub fn push(&mut self, fragment: &str) {
        self.window.push_str(fragment);

        let len = self.window.chars().count();
        if len > self.capacity {
            let cut = self
                .window
                .char_indices()
                .nth(len - self.capacity)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            self.window.drain(..cut);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.window
    }
}
