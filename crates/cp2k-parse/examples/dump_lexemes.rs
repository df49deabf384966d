use std::io::Read;

use cp2k_parse::{Lexer, Sanitizer};

fn main() {
    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    println!("=== Lines ===");
    for line in Sanitizer::new(&source) {
        println!("{:?}", line);
    }

    println!("\n=== Lexemes ===");
    for lex in Lexer::new(&source) {
        println!("{:?}", lex);
    }
}
