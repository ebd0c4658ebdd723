use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::error::{LinearError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if config_path.exists() {
        let answer = ask(
            &mut input,
            &mut output,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;
        if !answer.eq_ignore_ascii_case("y") {
            writeln!(output, "Aborted.")?;
            return Ok(());
        }
    }

    let config = prompt_config(&mut input, &mut output)?;
    config.save_to(&config_path)?;

    writeln!(output, "\nConfig saved to {}", config_path.display())?;
    writeln!(output, "You can now start the server with 'linear-mcp serve'.")?;

    Ok(())
}

fn prompt_config(input: &mut impl BufRead, output: &mut impl Write) -> Result<Config> {
    writeln!(output, "Linear MCP Configuration")?;
    writeln!(output, "========================\n")?;

    let api_key = ask(
        input,
        output,
        "Enter your Linear API key (create one at https://linear.app/settings/api): ",
    )?;
    if api_key.is_empty() {
        return Err(LinearError::MissingApiKey);
    }

    let api_url = ask(
        input,
        output,
        "Enter a custom GraphQL endpoint [optional, press enter for the default]: ",
    )?;

    Ok(Config {
        api_key: Some(api_key),
        api_url: (!api_url.is_empty()).then_some(api_url),
    })
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
