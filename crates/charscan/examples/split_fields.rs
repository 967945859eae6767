//! Splits a record of quoted, escaped, entity-bearing fields with a
//! syntax-driven scan.
//!
//! ```sh
//! cargo run --example split_fields
//! ```

use charscan::{CharStreamScanner, ScanSyntax};

fn main() {
    let record = "name=\"Smith, John\",title='can''t stop',note=hi &amp; bye,end";
    let syntax = ScanSyntax {
        escape: Some('\\'),
        quote_start: Some('"'),
        quote_end: Some('"'),
        alt_quote_start: Some('\''),
        alt_quote_end: Some('\''),
        alt_quote_escape: Some('\''),
        alt_quote_escape_lazy: true,
        entity_start: Some('&'),
        entity_end: Some(';'),
        entity_resolver: Some(Box::new(|name| match name {
            "amp" => Some("&".to_string()),
            "lt" => Some("<".to_string()),
            "gt" => Some(">".to_string()),
            _ => None,
        })),
        ..Default::default()
    };

    let mut scanner = CharStreamScanner::from_text(record);
    loop {
        match scanner.read_until_with_syntax(',', true, &syntax) {
            Ok(Some(field)) => {
                println!("field: {field}");
                match scanner.is_eot() {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => {
                        eprintln!("error: {e}");
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
}
