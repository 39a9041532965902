use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use pyrite::lexer;

fn main() -> Result<()> {
    let mut input_path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        if input_path.is_some() {
            bail!("Only one input file is supported");
        }
        input_path = Some(arg);
    }

    let source = if let Some(path) = input_path {
        fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        buffer
    };

    let tokens = lexer::tokenize(&source)?;
    for token in &tokens {
        println!("{token}");
    }
    Ok(())
}
