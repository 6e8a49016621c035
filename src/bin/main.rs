/// CLI tool for rendering rill templates
use rill::{diagnostic, parse, HelperRegistry, RenderPass, Scope, Value};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  rill <file> [options]             Render a template file");
    eprintln!("  rill - [options]                  Read template from stdin");
    eprintln!("  rill --help                       Show this help message");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --var name=value    Add a string variable to the scope (repeatable)");
    eprintln!("  --repeat N          Render the template N times in one pass");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  rill page.rill --var user=ada");
    eprintln!("  rill row.rill --repeat 4          # cycle helpers advance each time");
    eprintln!("  cat page.rill | rill - --var user=ada");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    if args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    // Read template
    let template_source = if args[1] == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
            eprintln!("Error reading from stdin: {}", e);
            process::exit(1);
        });
        buffer
    } else {
        fs::read_to_string(&args[1]).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", args[1], e);
            process::exit(1);
        })
    };

    // Determine source name for diagnostics
    let source_name = if args[1] == "-" { "<stdin>" } else { &args[1] };

    // Parse options
    let mut scope = Scope::new();
    let mut repeat = 1usize;
    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            "--var" => {
                let assignment = args.get(index + 1).unwrap_or_else(|| {
                    eprintln!("--var requires a name=value argument");
                    process::exit(1);
                });
                match assignment.split_once('=') {
                    Some((name, value)) if !name.is_empty() => {
                        scope.add(name, Value::Str(value.to_string()));
                    }
                    _ => {
                        eprintln!("Invalid --var argument '{}', expected name=value", assignment);
                        process::exit(1);
                    }
                }
                index += 2;
            }
            "--repeat" => {
                let count = args.get(index + 1).unwrap_or_else(|| {
                    eprintln!("--repeat requires a count");
                    process::exit(1);
                });
                repeat = count.parse::<usize>().unwrap_or_else(|e| {
                    eprintln!("Error parsing repeat count '{}': {}", count, e);
                    process::exit(1);
                });
                index += 2;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }

    let template = parse(&template_source).unwrap_or_else(|e| {
        let diagnostic = diagnostic::report_parse_error(source_name, &template_source, &e);
        eprint!("{}", diagnostic);
        process::exit(1);
    });

    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    for _ in 0..repeat {
        match pass.render(&template).await {
            Ok(output) => println!("{}", output),
            Err(e) => {
                let diagnostic =
                    diagnostic::report_render_error(source_name, &template_source, &e);
                eprint!("{}", diagnostic);
                process::exit(1);
            }
        }
    }
}
