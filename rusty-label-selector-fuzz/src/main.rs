use afl::fuzz;
use rusty_label_selector::try_parse;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(s) = std::str::from_utf8(data) {
            // Anything that parses must survive a render/parse cycle unchanged.
            if let Ok(selector) = try_parse(s) {
                let rendered = selector.to_string();
                assert_eq!(try_parse(&rendered).ok(), Some(selector));
            }
        }
    });
}
