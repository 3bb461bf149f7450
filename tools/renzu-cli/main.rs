use clap::Parser;
use renzu::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// A deterministic pipeline-to-script compilation engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the pipeline graph JSON file
    pipeline_path: Option<String>,

    /// Optional path to write the generated Python script (stdout when absent)
    #[arg(short, long)]
    output: Option<String>,

    /// Definition pack files (JSON arrays of node definitions) to register
    /// on top of the built-in catalog
    #[arg(long = "defs", value_name = "FILE")]
    definition_paths: Vec<String>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

fn run_generation(
    pipeline_path: String,
    definition_paths: Vec<String>,
    output_path: Option<String>,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let pipeline_json = fs::read_to_string(&pipeline_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read pipeline file '{}': {}",
            &pipeline_path, e
        ))
    });

    let mut registry = NodeRegistry::with_builtins();
    for defs_path in &definition_paths {
        let defs_json = fs::read_to_string(defs_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read definition pack '{}': {}",
                defs_path, e
            ))
        });
        let defs: Vec<NodeDefinition> = serde_json::from_str(&defs_json).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to parse definition pack '{}': {}",
                defs_path, e
            ))
        });
        for def in defs {
            registry.register(def);
        }
    }
    let load_duration = load_start.elapsed();

    // --- 2. Parsing ---
    let graph: PipelineGraph = serde_json::from_str(&pipeline_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse pipeline JSON: {}", e)));

    println!(
        "Loaded pipeline: {} nodes, {} connections, {} definitions registered.",
        graph.nodes.len(),
        graph.connections.len(),
        registry.len()
    );

    // --- 3. Compilation ---
    println!("\nStarting Renzu Pipeline Compilation...");
    let compile_start = Instant::now();
    let compiler = Compiler::builder(graph, &registry).build();

    let program = compiler
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    println!(
        "Compilation Successful! {} node(s) emitted in {:?}",
        program.visited.len(),
        compile_duration
    );
    if !program.omitted.is_empty() {
        println!(
            "  -> Omitted {} unreachable node(s): {}",
            program.omitted.len(),
            program.omitted.join(", ")
        );
    }
    if let Some(failure) = &program.failure {
        println!("  -> Diagnostic script generated instead: {}", failure);
    }

    // --- 4. Output ---
    match &output_path {
        Some(path) => {
            fs::write(path, &program.source).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write script to '{}': {}", path, e))
            });
            println!("Generated script written to '{}'.", path);
        }
        None => {
            println!("\n--- Generated Script ---");
            print!("{}", program.source);
            println!("------------------------");
        }
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:    {:?}", load_duration);
    println!("Compilation:     {:?}", compile_duration);
    println!("---------------------------");
    println!("Total Execution: {:?}", total_duration);
    println!();
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let pipeline_path = cli.pipeline_path.unwrap_or_else(|| {
        exit_with_error("Pipeline path is required in non-interactive mode.");
    });

    run_generation(pipeline_path, cli.definition_paths, cli.output);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Renzu Interactive Mode ---");

    let pipeline_path = prompt_for_input("Enter pipeline graph path", Some("data/pipeline.json"));
    let defs_path = prompt_for_input("Enter definition pack path (optional)", None);
    let output_path_str =
        prompt_for_input("Enter output script path (optional)", Some("pipeline.py"));

    let definition_paths = if defs_path.is_empty() {
        Vec::new()
    } else {
        vec![defs_path]
    };
    let output_path = if output_path_str.is_empty() {
        None
    } else {
        Some(output_path_str)
    };

    run_generation(pipeline_path, definition_paths, output_path);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
