use clap::Parser;
use css_value_grammar::printer::PrinterOptions;
use css_value_grammar::registry::{RegistryOptions, SpecRegistry, ValidationState};
use css_value_grammar::traits::ToCss;
use css_value_grammar::values::value::list_to_css_string;
use std::{fmt, fs, io};

#[derive(Parser, Debug)]
#[clap(author, about, long_about = None)]
struct CliArgs {
  /// The property to look up
  #[clap(required_unless_present = "audit")]
  property: Option<String>,
  /// A declaration value to validate, or to complete with --suggest
  value: Option<String>,
  /// Print the values that may follow the given value
  #[clap(short, long)]
  suggest: bool,
  /// Minify the normalized value
  #[clap(short, long)]
  minify: bool,
  /// Print the result as JSON
  #[clap(long)]
  json: bool,
  /// A property table in mdn-data format, instead of the bundled one
  #[clap(long, requires = "syntaxes")]
  properties: Option<String>,
  /// A syntax table in mdn-data format, instead of the bundled one
  #[clap(long, requires = "properties")]
  syntaxes: Option<String>,
  /// Check every property grammar, and report the problems found
  #[clap(long)]
  audit: bool,
}

pub fn main() -> Result<(), std::io::Error> {
  env_logger::init();
  let cli_args = CliArgs::parse();

  let registry = match (&cli_args.properties, &cli_args.syntaxes) {
    (Some(properties), Some(syntaxes)) => {
      let properties = fs::read_to_string(properties)?;
      let syntaxes = fs::read_to_string(syntaxes)?;
      SpecRegistry::from_json(&properties, &syntaxes, &RegistryOptions::default())
    }
    _ => SpecRegistry::bundled(),
  };
  let registry = registry.unwrap_or_else(|err| exit_with(err));

  if cli_args.audit {
    return audit(&registry, cli_args.json);
  }

  // clap requires a property unless --audit is passed.
  let property = match &cli_args.property {
    Some(property) => property.as_str(),
    None => return Ok(()),
  };

  if cli_args.suggest {
    let text = cli_args.value.as_deref().unwrap_or("");
    let suggestions = registry.suggest(property, text).unwrap_or_else(|err| exit_with(err));
    if cli_args.json {
      println!("{}", serde_json::to_string(&suggestions)?);
    } else {
      for suggestion in &suggestions {
        println!("{}", suggestion.label());
      }
    }
    return Ok(());
  }

  let text = match &cli_args.value {
    Some(text) => text,
    None => {
      let entry = registry
        .get(property)
        .unwrap_or_else(|| exit_with(format!("Unknown property '{}'", property)));
      if cli_args.json {
        println!("{}", serde_json::to_string(entry)?);
      } else {
        println!("{}", entry.syntax);
      }
      return Ok(());
    }
  };

  let validation = registry.validate(property, text).unwrap_or_else(|err| exit_with(err));
  if cli_args.json {
    println!("{}", serde_json::to_string(&validation)?);
  } else {
    let css = list_to_css_string(
      &validation.values,
      PrinterOptions {
        minify: cli_args.minify,
      },
    )
    .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    match &validation.state {
      ValidationState::Complete => println!("{}", css),
      ValidationState::Incomplete => exit_with(format!("Incomplete value for {}: {}", property, css)),
      ValidationState::Invalid { index } => {
        let component = validation.values[*index]
          .to_css_string(PrinterOptions::default())
          .unwrap_or_default();
        exit_with(format!(
          "Invalid value for {}: unexpected '{}' at component {}",
          property, component, index
        ))
      }
    }
  }

  if validation.state != ValidationState::Complete {
    std::process::exit(1);
  }
  Ok(())
}

fn audit(registry: &SpecRegistry, json: bool) -> Result<(), std::io::Error> {
  let failures = registry.audit();
  if json {
    println!("{}", serde_json::to_string(&failures)?);
  } else {
    for (name, err) in registry.excluded() {
      println!("{}: excluded: {}", name, err);
    }
    for failure in &failures {
      println!("{}: {}", failure.property, failure.error);
    }
    println!(
      "Checked {} properties, {} problems found",
      registry.properties().count(),
      failures.len() + registry.excluded().len()
    );
  }

  if !failures.is_empty() || !registry.excluded().is_empty() {
    std::process::exit(1);
  }
  Ok(())
}

fn exit_with<E: fmt::Display, T>(err: E) -> T {
  eprintln!("{}", err);
  std::process::exit(1);
}
