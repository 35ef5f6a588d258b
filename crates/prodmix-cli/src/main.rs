use clap::{Parser, Subcommand};
use std::path::PathBuf;

use prodmix_model::{
    build_model, flatten, format_number, interpret, status_label, AnalysisResult, ProblemForm,
    ProblemSpec, ProductField, ResourceField, ShadowPrice,
};
use prodmix_solver::{Adapter, SolveStatus};

#[derive(Parser)]
#[command(name = "prodmix")]
#[command(about = "Product-mix planning over limited resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and report the optimal plan
    Solve {
        /// JSON file describing the problem
        file: PathBuf,
        /// Emit the full analysis as JSON
        #[arg(long)]
        json: bool,
        /// Emit flat key/value rows instead of tables
        #[arg(long)]
        flat: bool,
    },
    /// Validate a problem file without solving it
    Check {
        /// JSON file describing the problem
        file: PathBuf,
    },
    /// Print a ready-to-solve example problem (wyndor, bakery)
    Template {
        /// Template name
        name: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, json, flat } => {
            let spec = load_spec(&file);
            let result = Adapter::new().solve(&build_model(&spec));
            let analysis = interpret(&spec, &result);

            if json {
                match serde_json::to_string_pretty(&analysis) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error serializing analysis: {}", e);
                        std::process::exit(1);
                    }
                }
            } else if flat {
                for row in flatten(&analysis) {
                    println!("{}\t{}", row.key, row.value);
                }
            } else {
                print_report(&analysis);
            }

            if analysis.status != SolveStatus::Optimal {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let spec = load_spec(&file);
            println!("✓ {} is valid", file.display());
            println!("  {} products", spec.num_products());
            println!("  {} resources", spec.num_resources());
            println!(
                "  domain: {}",
                if spec.has_integer_domain() {
                    "integer"
                } else {
                    "continuous"
                }
            );
        }
        Commands::Template { name } => match template(&name) {
            Some(form) => match serde_json::to_string_pretty(&form) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error serializing template: {}", e);
                    std::process::exit(1);
                }
            },
            None => {
                eprintln!("Unknown template: {} (expected wyndor or bakery)", name);
                std::process::exit(1);
            }
        },
    }
}

fn load_spec(file: &PathBuf) -> ProblemSpec {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let form: ProblemForm = match serde_json::from_str(&source) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error parsing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match form.validate() {
        Ok(spec) => spec,
        Err(errors) => {
            eprintln!("✗ {} has errors:", file.display());
            for error in errors.errors() {
                eprintln!("  {}", error);
            }
            std::process::exit(1);
        }
    }
}

fn print_report(analysis: &AnalysisResult) {
    if !analysis.problem.is_empty() {
        println!("Problem: {}", analysis.problem);
    }
    println!("Status: {}", status_label(analysis.status).to_uppercase());

    if let Some(explanation) = &analysis.explanation {
        println!("{}", explanation);
        return;
    }

    if let Some(objective) = analysis.objective_value {
        println!("Objective: {}", format_number(objective));
    }
    println!();

    println!("Production plan:");
    for q in &analysis.quantities {
        println!(
            "  {:20} {:>10} @ {:<8} = {}",
            q.product,
            format_number(q.quantity),
            format_number(q.unit_value),
            format_number(q.total_value)
        );
    }
    println!();

    println!("Resources:");
    for usage in &analysis.resources {
        println!(
            "  {:20} {:>10} / {:<10} slack {:>10}  {:>7}%{}",
            usage.resource,
            format_number(usage.used),
            format_number(usage.available),
            format_number(usage.slack),
            format_number(usage.utilization_pct),
            if usage.is_binding { "  BINDING" } else { "" }
        );
    }
    println!();

    println!("Shadow prices:");
    for entry in &analysis.shadow_prices {
        match entry.price {
            ShadowPrice::PerUnit(price) => {
                println!("  {:20} {:>10} per unit", entry.resource, format_number(price));
                if price.abs() > 0.001 {
                    println!(
                        "    one more unit of {} is worth {}",
                        entry.resource,
                        format_number(price)
                    );
                }
            }
            ShadowPrice::NotApplicable => {
                println!("  {:20} {:>10}", entry.resource, "n/a");
            }
        }
    }
}

fn template(name: &str) -> Option<ProblemForm> {
    match name.to_ascii_lowercase().as_str() {
        "wyndor" => Some(ProblemForm {
            name: "wyndor glass".to_string(),
            direction: "maximize".to_string(),
            domain: "continuous".to_string(),
            products: vec![
                ProductField {
                    name: "doors".to_string(),
                    value: "300".to_string(),
                    min_quantity: None,
                },
                ProductField {
                    name: "windows".to_string(),
                    value: "500".to_string(),
                    min_quantity: None,
                },
            ],
            resources: vec![
                ResourceField {
                    name: "plant_1".to_string(),
                    capacity: "4".to_string(),
                },
                ResourceField {
                    name: "plant_2".to_string(),
                    capacity: "12".to_string(),
                },
                ResourceField {
                    name: "plant_3".to_string(),
                    capacity: "18".to_string(),
                },
            ],
            usage: vec![
                vec!["1".to_string(), "0".to_string()],
                vec!["0".to_string(), "2".to_string()],
                vec!["3".to_string(), "2".to_string()],
            ],
        }),
        "bakery" => Some(ProblemForm {
            name: "bakery".to_string(),
            direction: "maximize".to_string(),
            domain: "continuous".to_string(),
            products: vec![
                ProductField {
                    name: "cookies".to_string(),
                    value: "2".to_string(),
                    min_quantity: None,
                },
                ProductField {
                    name: "cakes".to_string(),
                    value: "8".to_string(),
                    min_quantity: None,
                },
            ],
            resources: vec![
                ResourceField {
                    name: "oven_hours".to_string(),
                    capacity: "40".to_string(),
                },
                ResourceField {
                    name: "mixing_hours".to_string(),
                    capacity: "30".to_string(),
                },
                ResourceField {
                    name: "ingredients_kg".to_string(),
                    capacity: "50".to_string(),
                },
            ],
            usage: vec![
                vec!["0.5".to_string(), "2".to_string()],
                vec!["0.3".to_string(), "1".to_string()],
                vec!["0.2".to_string(), "1.5".to_string()],
            ],
        }),
        _ => None,
    }
}
