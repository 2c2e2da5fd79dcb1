//=========================================================================
// Platform Event Mapper
//
// Converts Winit logical keys to the key names carried by `keydown`
// payloads.
//
// Names follow the W3C `KeyboardEvent.key` values that Winit's
// `NamedKey` is modeled on: printable keys yield their text ("a", "A",
// "7"), named keys their name ("ArrowUp", "Enter", "Escape"), and the
// space bar yields " ".
//
//=========================================================================

use winit::keyboard::{Key, NamedKey};

//=== Key Conversion ======================================================

/// Payload name for a logical key, or `None` for dead and unidentified
/// keys.
pub(crate) fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => Some(named_key_name(*named)),
        Key::Dead(_) | Key::Unidentified(_) => None,
    }
}

fn named_key_name(named: NamedKey) -> String {
    match named {
        NamedKey::Space => " ".to_string(),
        //--- Fallback ---------------------------------------------------------
        // Variant names already match the W3C names.
        other => format!("{:?}", other),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
