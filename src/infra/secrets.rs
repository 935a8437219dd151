use std::{any::Any, panic};

const MASK: &str = "[REDACTED]";

/// A fragment containing one of these is always masked, whatever its shape.
const CREDENTIAL_MARKERS: [&str; 4] = ["password", "passcode", "secret", "token"];

/// Replaces credential-looking fragments of free-form text with a mask.
///
/// Operates on whitespace-delimited fragments; a fragment is masked when it
/// carries a credential marker or resembles a credential value itself.
pub fn scrub(input: &str) -> String {
    let mut masked: Vec<&str> = Vec::new();
    for fragment in input.split_whitespace() {
        if is_sensitive(fragment) {
            masked.push(MASK);
        } else {
            masked.push(fragment);
        }
    }

    masked.join(" ")
}

/// Installs a panic hook that scrubs the payload before it reaches stderr.
/// Panic payloads can embed form contents, passwords included.
pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|info| {
        let message = scrub(&payload_text(info.payload()));

        match info.location() {
            Some(location) => eprintln!(
                "pchat panic: {message} ({}:{}:{})",
                location.file(),
                location.line(),
                location.column()
            ),
            None => eprintln!("pchat panic: {message}"),
        }
    }));
}

fn payload_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        return (*text).to_owned();
    }

    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| "panic payload omitted".to_owned())
}

fn is_sensitive(fragment: &str) -> bool {
    let lowered = fragment.to_ascii_lowercase();
    if CREDENTIAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }

    resembles_credential(fragment)
}

/// Six or more alphanumeric characters that are all digits or mix letters
/// with digits, the shape of this app's passwords and backend ids.
fn resembles_credential(fragment: &str) -> bool {
    let core: String = fragment
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect();
    if core.len() < 6 {
        return false;
    }

    let digits = core.chars().filter(|ch| ch.is_ascii_digit()).count();
    digits == core.len() || (digits > 0 && digits < core.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_fragments_are_masked() {
        let output = scrub("login failed password=abc1234 token=xyz789");

        assert!(!output.contains("abc1234"));
        assert!(!output.contains("xyz789"));
        assert!(output.contains(MASK));
    }

    #[test]
    fn plain_prose_passes_through() {
        assert_eq!(scrub("chat list fetch failed"), "chat list fetch failed");
    }

    #[test]
    fn mixed_alphanumeric_values_resemble_credentials() {
        assert!(resembles_credential("abc1234"));
        assert!(resembles_credential("9914421"));
        assert!(!resembles_credential("alice"));
        assert!(!resembles_credential("a1"));
    }
}
