use authflow_graph::export::config_to_yaml;
use authflow_graph::prelude::*;
use authflow_graph::terminology;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Lay out, inspect and export authentication-flow configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an authflow configuration (YAML, or JSON by extension).
    /// The bundled initial configuration is used when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Flow category to work on, e.g. `signup` or `login_flows`
    #[arg(long, global = true, default_value = "signup")]
    category: String,

    /// Index of the flow inside the category
    #[arg(long, global = true, default_value_t = 0)]
    index: usize,

    /// Log engine activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the selected flow as YAML
    Yaml {
        /// Export every flow of the configuration instead of the selected one
        #[arg(long)]
        all: bool,
    },
    /// Print the laid out graph of the selected flow as JSON
    Graph,
    /// Print a human-readable outline of the selected flow
    Summary,
    /// List the bundled recipes
    Recipes,
    /// Load a bundled recipe into the selected slot and print it
    Recipe {
        id: String,
        /// Print the laid out graph instead of YAML
        #[arg(long)]
        graph: bool,
    },
    /// Edit the selected flow interactively
    Edit,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let category: FlowCategory = cli
        .category
        .parse()
        .unwrap_or_else(|e: ConfigError| exit_with_error(&e.to_string()));

    let config = match &cli.config {
        Some(path) => AuthflowConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e))),
        None => authflow_graph::session::initial_config().unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load initial configuration: {}", e))
        }),
    };

    let mut session = EditorSession::new(config);
    session.select_category(category);

    match cli.command {
        Command::Recipes => list_recipes(),
        Command::Recipe { id, graph } => {
            select_or_exit(&mut session, category, cli.index);
            let library = load_library();
            let recipe = library
                .get(&id)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            session.load_recipe(recipe);
            if graph {
                print_graph(&session);
            } else {
                print!("{}", session.preview());
            }
        }
        Command::Yaml { all } => {
            if all {
                let yaml = config_to_yaml(session.config())
                    .unwrap_or_else(|e| exit_with_error(&e.to_string()));
                print!("{}", yaml);
            } else {
                select_or_exit(&mut session, category, cli.index);
                print!("{}", session.preview());
            }
        }
        Command::Graph => {
            select_or_exit(&mut session, category, cli.index);
            print_graph(&session);
        }
        Command::Summary => {
            select_or_exit(&mut session, category, cli.index);
            print_summary(&session);
        }
        Command::Edit => {
            select_or_exit(&mut session, category, cli.index);
            run_interactive(&mut session);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn select_or_exit(session: &mut EditorSession, category: FlowCategory, index: usize) {
    // An empty slot is fine for a recipe load, which appends.
    if session.config().flows(category).is_empty() && index == 0 {
        return;
    }
    session
        .select_flow(category, index)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
}

fn load_library() -> RecipeLibrary {
    RecipeLibrary::builtin()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load recipes: {}", e)))
}

fn list_recipes() {
    let library = load_library();
    println!("--- Bundled Recipes ({}) ---", library.len());
    for recipe in library.iter() {
        println!("{:<24} {}", recipe.id, recipe.name);
        println!("{:<24} {}", "", recipe.description);
    }
}

fn print_graph(session: &EditorSession) {
    let json = session
        .graph()
        .to_json()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("{}", json);
}

fn print_summary(session: &EditorSession) {
    let selection = session.selection();
    let Some(flow) = session.current_flow() else {
        println!("No flow at {}[{}]", selection.category, selection.index);
        return;
    };

    println!(
        "--- {} ({}[{}]) ---",
        flow.name, selection.category, selection.index
    );
    let graph = session.graph();
    for node in &graph.nodes {
        let indent = "  ".repeat(node.path.depth());
        let mut line = format!(
            "{}{} [{}] {}",
            indent,
            node.title,
            node.id,
            node.step.display_name()
        );
        if node.step.optional {
            line.push_str(" (optional)");
        }
        if let Some(target) = node.step.jump_target() {
            line.push_str(&format!(" -> {}", target));
        }
        println!("{}", line);
        if let Some(description) = terminology::describe(&node.step.kind) {
            println!("{}    {}", indent, description);
        }
    }

    println!("\n--- Graph Summary ---");
    println!("Nodes:            {}", graph.nodes.len());
    println!("Sequential edges: {}", graph.edges_of_kind(EdgeKind::Sequential).count());
    println!("Branch edges:     {}", graph.edges_of_kind(EdgeKind::BranchEntry).count());
    println!("Jump edges:       {}", graph.edges_of_kind(EdgeKind::Jump).count());
    for jump in &graph.unresolved_jumps {
        println!("Unresolved jump:  {} -> {}", jump.node_id, jump.target);
    }
}

/// Runs a small line-oriented editor over the selected flow.
fn run_interactive(session: &mut EditorSession) {
    println!("--- authflow Interactive Mode ---");
    println!("Commands: show | yaml | add <kind> | delete <node> | connect <from> <to>");
    println!("          optional <node> | recipe <id> | new <name> | reset | quit");

    loop {
        let line = prompt_for_input("edit");
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next(), words.next()) {
            (Some("quit") | Some("exit"), _, _) => break,
            (Some("show"), _, _) => {
                print_summary(session);
                continue;
            }
            (Some("yaml"), _, _) => {
                print!("{}", session.preview());
                continue;
            }
            (Some("add"), Some(kind), _) => EditCommand::AddStep {
                kind: kind.to_string(),
            },
            (Some("delete"), Some(node), _) => match uid_of(session, node) {
                Some(uid) => EditCommand::DeleteStep(uid),
                None => continue,
            },
            (Some("optional"), Some(node), _) => match step_of(session, node) {
                Some(step) => EditCommand::UpdateStep(Step {
                    optional: !step.optional,
                    ..step
                }),
                None => continue,
            },
            (Some("connect"), Some(source), Some(target)) => EditCommand::Connect {
                source: source.to_string(),
                target: target.to_string(),
            },
            (Some("recipe"), Some(id), _) => match load_library().get(id) {
                Ok(recipe) => EditCommand::LoadRecipe(recipe.clone()),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            (Some("new"), Some(name), _) => EditCommand::NewFlow {
                name: name.to_string(),
            },
            (Some("reset"), _, _) => EditCommand::Reset,
            (None, _, _) => continue,
            _ => {
                println!("Unrecognised command: {}", line.trim());
                continue;
            }
        };

        match session.apply(command) {
            Ok(()) => print_summary(session),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn step_of(session: &EditorSession, node_id: &str) -> Option<Step> {
    let step = session.graph().node(node_id).map(|n| n.step.clone());
    if step.is_none() {
        println!("No node '{}' in the current flow", node_id);
    }
    step
}

fn uid_of(session: &EditorSession, node_id: &str) -> Option<StepUid> {
    step_of(session, node_id).and_then(|step| step.uid)
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    if io::stdout().flush().is_err() || io::stdin().read_line(&mut line).is_err() {
        exit_with_error("Failed to read from the terminal");
    }
    if line.is_empty() {
        // EOF
        return "quit".to_string();
    }
    line
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
