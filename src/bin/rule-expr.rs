use std::{env, fs, process::ExitCode};

use rule_expr::{context_from_json, lex, parse, Context, Evaluator};

#[derive(Debug)]
struct EvalOptions {
    context_path: Option<String>,
    pretty: bool,
}

fn main() -> ExitCode {
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    if args.len() < 3 {
        return Err("not enough arguments".to_string());
    }

    let command = args[1].as_str();
    let source = args[2].as_str();

    match command {
        "eval" => {
            let options = parse_eval_options(&args[3..])?;
            run_eval(source, &options)
        }
        "parse" => {
            let pretty = parse_print_options(&args[3..])?;
            run_parse(source, pretty)
        }
        "tokens" => {
            let pretty = parse_print_options(&args[3..])?;
            run_tokens(source, pretty)
        }
        _ => Err(format!("unknown command '{command}'")),
    }
}

fn run_eval(source: &str, options: &EvalOptions) -> Result<(), String> {
    let context = match &options.context_path {
        Some(path) => {
            let text =
                fs::read_to_string(path).map_err(|e| format!("failed to read '{path}': {e}"))?;
            let json: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| format!("invalid JSON in '{path}': {e}"))?;
            context_from_json(&json).map_err(|e| e.to_string())?
        }
        None => Context::new(),
    };

    let value = Evaluator::new()
        .eval_source(source, &context)
        .map_err(|e| e.to_string())?;
    println!("{}", render_json(&value.to_json(), options.pretty)?);
    Ok(())
}

fn run_parse(source: &str, pretty: bool) -> Result<(), String> {
    let program = parse(source).map_err(|e| e.to_string())?;
    let json = serde_json::to_value(&program).map_err(|e| e.to_string())?;
    println!("{}", render_json(&json, pretty)?);
    Ok(())
}

fn run_tokens(source: &str, pretty: bool) -> Result<(), String> {
    let tokens = lex(source).map_err(|e| e.to_string())?;
    let json = serde_json::to_value(&tokens).map_err(|e| e.to_string())?;
    println!("{}", render_json(&json, pretty)?);
    Ok(())
}

fn render_json(value: &serde_json::Value, pretty: bool) -> Result<String, String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| e.to_string())
}

fn parse_eval_options(args: &[String]) -> Result<EvalOptions, String> {
    let mut context_path = None;
    let mut pretty = false;
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--context" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --context (expected a JSON file)".to_string());
                }
                context_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--pretty" => {
                pretty = true;
                i += 1;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(EvalOptions {
        context_path,
        pretty,
    })
}

fn parse_print_options(args: &[String]) -> Result<bool, String> {
    let mut pretty = false;
    for arg in args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            other => return Err(format!("unknown option '{other}'")),
        }
    }
    Ok(pretty)
}

fn print_usage() {
    eprintln!("usage:");
    eprintln!("  rule-expr eval <expr> [--context <file.json>] [--pretty]");
    eprintln!("  rule-expr parse <expr> [--pretty]");
    eprintln!("  rule-expr tokens <expr> [--pretty]");
    eprintln!();
    eprintln!("eval prints the result as JSON (undefined prints as null); parse and");
    eprintln!("tokens print the AST and token stream. A context file must hold one");
    eprintln!("JSON object whose top-level keys become expression variables.");
}

#[cfg(test)]
mod tests {
    use super::{parse_eval_options, parse_print_options};

    #[test]
    fn parse_eval_context_and_pretty() {
        let args = vec![
            "--context".to_string(),
            "ctx.json".to_string(),
            "--pretty".to_string(),
        ];
        let options = parse_eval_options(&args).unwrap();
        assert_eq!(options.context_path.as_deref(), Some("ctx.json"));
        assert!(options.pretty);
    }

    #[test]
    fn parse_eval_defaults() {
        let options = parse_eval_options(&[]).unwrap();
        assert!(options.context_path.is_none());
        assert!(!options.pretty);
    }

    #[test]
    fn parse_eval_context_requires_value() {
        let args = vec!["--context".to_string()];
        let err = parse_eval_options(&args).unwrap_err();
        assert!(err.contains("missing value for --context"));
    }

    #[test]
    fn parse_eval_rejects_unknown_option() {
        let args = vec!["--wat".to_string()];
        let err = parse_eval_options(&args).unwrap_err();
        assert!(err.contains("unknown option"));
    }

    #[test]
    fn parse_print_pretty() {
        assert!(parse_print_options(&["--pretty".to_string()]).unwrap());
        assert!(!parse_print_options(&[]).unwrap());
    }
}
