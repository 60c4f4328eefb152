use rusty_label_selector::Selector;
use rusty_label_selector::predicate::{Backend, CollectionBackend, JsonBackend};

fn main() {
    let inputs = [
        "env in (prod, staging), tier != db, !canary",
        "app.kubernetes.io/name = nginx, team",
        "env in (prod,)",
        "a b",
        "ключ = значение",
    ];

    for input in inputs {
        println!("\nParsing: {}", input);
        match input.parse::<Selector>() {
            Ok(selector) => {
                println!("  OK! Printed: '{}'", selector);
                println!("  Parsed: {:?}", selector);
                println!(
                    "  Tags: {}",
                    CollectionBackend::default().compile(&selector).to_sql("tags")
                );
                println!(
                    "  Postgres: {}",
                    JsonBackend::postgres().compile(&selector).to_sql("labels")
                );
            }
            Err(e) => println!("  Error:\n{}", e.render()),
        }
    }
}
