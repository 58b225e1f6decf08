// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use gatestep::config::consts::DEFAULT_REVEAL_LATENCY_MS;
use gatestep::config::{load_scenario, Architecture, SimulationParams};
use gatestep::engine::{FixedPacing, ImmediatePacing, RevealPacing, SequencerEvent};
use gatestep::math::Vector;
use gatestep::observability::messages::session::ScenarioLoaded;
use gatestep::observability::messages::StructuredLog;
use gatestep::session::SimulationSession;

/// Demo walkthrough with description and points to watch for
struct DemoScenario {
    architecture: Architecture,
    title: &'static str,
    description: &'static str,
    highlights: Vec<&'static str>,
    params: SimulationParams,
}

/// Wait for user to press Enter with a custom prompt
fn wait_for_keypress(prompt: &str) {
    print!("{}", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
}

fn format_vector(vector: &Vector) -> String {
    let components: Vec<String> = vector.0.iter().map(|v| format!("{:.3}", v)).collect();
    format!("[{}]", components.join(", "))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    // Check for demo mode
    if args.len() >= 2 && args[1] == "--demo-mode" {
        run_guided_demo().await;
        return;
    }

    let (scenario_files, steps, json_output) = parse_run_args(&args[1..]);
    if scenario_files.is_empty() {
        eprintln!(
            "Usage: {} <scenario1.yaml> [scenario2.yaml ...] [--steps N] [--json]",
            args[0]
        );
        eprintln!("       {} --demo-mode", args[0]);
        eprintln!("Example: {} scenarios/update-gate.yaml", args[0]);
        eprintln!(
            "Example: {} scenarios/gru-reset.yaml scenarios/lstm.yaml --steps 3",
            args[0]
        );
        eprintln!("Demo:    {} --demo-mode", args[0]);
        std::process::exit(1);
    }

    if !json_output {
        println!("🚀 Gatestep Scenario Runner");
        println!("═══════════════════════════");
        println!("Scenario files: {:?}", scenario_files);
        println!("Time steps per scenario: {}", steps);
        println!();
    }

    for (i, scenario_file) in scenario_files.iter().enumerate() {
        if i > 0 && !json_output {
            println!("\n{}", "─".repeat(80));
        }

        match run_single_scenario(scenario_file, steps, json_output).await {
            Ok(_) => {}
            Err(e) => {
                eprintln!("❌ Failed to run {}: {}", scenario_file, e);
            }
        }
    }

    if !json_output {
        println!("\n🎉 Run complete!");
    }
}

/// Pull `--steps N` and `--json` out of the argument list; everything else
/// is a scenario file.
fn parse_run_args(args: &[String]) -> (Vec<String>, u64, bool) {
    let mut scenario_files = Vec::new();
    let mut steps: u64 = 1;
    let mut json_output = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--steps" => {
                steps = iter
                    .next()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(1);
            }
            "--json" => json_output = true,
            _ => scenario_files.push(arg.clone()),
        }
    }

    (scenario_files, steps.max(1), json_output)
}

/// Run the guided interactive demo across all three architectures
async fn run_guided_demo() {
    let demo_scenarios = vec![
        DemoScenario {
            architecture: Architecture::UpdateGate,
            title: "Update Gate Cell: One Gate",
            description: "The simplest gated cell: a single sigmoid gate decides how much old state survives",
            highlights: vec![
                "Entry nodes activate first; everything else waits on its inputs",
                "sigmoid(input + hidden + bias) keeps every gate value in (0, 1)",
                "The gate u blends u * hidden with (1 - u) * candidate",
                "A zero component with zero bias leaves the gate exactly at 0.5",
            ],
            params: SimulationParams {
                dimensionality: 2,
                input_x: Vector(vec![1.0, 0.0]),
                hidden_prev: Vector::zeros(2),
                cell_prev: Vector::new(),
                bias1: 0.0,
                bias2: 0.0,
                bias3: 0.0,
            },
        },
        DemoScenario {
            architecture: Architecture::Gru,
            title: "Gated Recurrent Unit: Reset and Update",
            description: "Two gates over shared history, with the candidate computed from the reset-gated mix",
            highlights: vec![
                "The reset gate r decides how much history reaches the candidate",
                "bias1 = -4 slams r toward zero, so the candidate sees almost none",
                "The candidate stays locked until both gates are done",
                "The update gate z then blends old state against that candidate",
            ],
            params: SimulationParams {
                dimensionality: 1,
                input_x: Vector(vec![1.0]),
                hidden_prev: Vector(vec![1.0]),
                cell_prev: Vector::new(),
                bias1: -4.0,
                bias2: 0.0,
                bias3: 0.0,
            },
        },
        DemoScenario {
            architecture: Architecture::Lstm,
            title: "Long Short-Term Memory: Three Gates and a Cell",
            description: "A separate cell state carries memory behind forget, input, and output gates",
            highlights: vec![
                "forget * cell keeps old memory; input * candidate writes new memory",
                "The hidden state is the output gate over tanh of the new cell",
                "All three gates read the same input + hidden mix",
                "Thirteen nodes, still resolved one Enter at a time",
            ],
            params: SimulationParams {
                dimensionality: 1,
                input_x: Vector(vec![2.0]),
                hidden_prev: Vector::zeros(1),
                cell_prev: Vector::zeros(1),
                bias1: 0.0,
                bias2: 0.0,
                bias3: 0.0,
            },
        },
    ];

    println!("🧮 Gatestep - Interactive Walkthrough Demo");
    println!("═══════════════════════════════════════════");
    println!();
    println!("Welcome to an interactive tour of gated recurrent cells!");
    println!("Every value below comes from one forward pass computed up front;");
    println!("pressing Enter only reveals the next node of the step graph.");
    println!();
    println!("We'll progress through 3 architectures of increasing complexity:");
    for (i, demo) in demo_scenarios.iter().enumerate() {
        println!("  {}. {}", i + 1, demo.title);
    }
    println!();

    wait_for_keypress("Press Enter to begin the demo... ");

    for (i, demo) in demo_scenarios.iter().enumerate() {
        println!("\n{}", "═".repeat(80));
        println!("Walkthrough {}: {}", i + 1, demo.title);
        println!("{}", "═".repeat(80));
        println!();
        println!("📖 Description:");
        println!("   {}", demo.description);
        println!();
        println!("🎯 What to watch:");
        for highlight in &demo.highlights {
            println!("   • {}", highlight);
        }
        println!();
        println!("📥 Inputs:");
        println!("   x      = {}", format_vector(&demo.params.input_x));
        println!("   hidden = {}", format_vector(&demo.params.hidden_prev));
        if !demo.params.cell_prev.is_empty() {
            println!("   cell   = {}", format_vector(&demo.params.cell_prev));
        }
        if demo.params.bias1 != 0.0 {
            println!("   bias1  = {}", demo.params.bias1);
        }
        println!();

        wait_for_keypress(&format!("Press Enter to start walkthrough {}... ", i + 1));

        let mut session = SimulationSession::new(
            demo.architecture,
            demo.params.clone(),
            Arc::new(FixedPacing::from_millis(DEFAULT_REVEAL_LATENCY_MS)),
        );
        run_interactive_walkthrough(&mut session).await;

        println!();
        println!("📊 Step Outputs:");
        println!(
            "   hidden' = {}",
            format_vector(&session.result().final_hidden)
        );
        if demo.architecture.has_cell_state() {
            println!(
                "   cell'   = {}",
                format_vector(&session.result().final_cell)
            );
        }
        println!();

        wait_for_keypress("Press Enter to feed the outputs back as the next step's inputs... ");
        match session.advance().await {
            Ok(step) => {
                println!("⏩ Advanced to time step {}", step);
                println!(
                    "   hidden_prev is now {}",
                    format_vector(&session.params().hidden_prev)
                );
                if demo.architecture.has_cell_state() {
                    println!(
                        "   cell_prev is now   {}",
                        format_vector(&session.params().cell_prev)
                    );
                }
            }
            Err(e) => {
                println!("❌ Advance rejected: {}", e);
            }
        }

        println!("\n✅ Walkthrough {} complete!", i + 1);

        if i < demo_scenarios.len() - 1 {
            println!();
            wait_for_keypress("Press Enter to continue to the next architecture... ");
        }
    }

    println!("\n{}", "═".repeat(80));
    println!("🎉 Demo Complete - Thank You!");
    println!("{}", "═".repeat(80));
    println!();
    println!("You've walked the forward pass of:");
    println!("• 🔹 Update Gate Cell - one gate blending retained and written state");
    println!("• 🔹 Gated Recurrent Unit - reset-gated history feeding the candidate");
    println!("• 🔹 Long Short-Term Memory - a separate cell state behind three gates");
    println!();
    println!("Next Steps:");
    println!("• 📚 Run scenario files: gatestep scenarios/lstm.yaml --steps 3");
    println!("• 🔍 Edit the bias lines in scenarios/*.yaml and watch the gates move");
    println!("• 🚀 Drive a session from your own code with gatestep::session::SimulationSession");
    println!();
    println!("Thank you for exploring Gatestep!");
}

/// Resolve one session node by node, one keypress per trigger
async fn run_interactive_walkthrough(session: &mut SimulationSession) {
    while !session.is_resolved().await {
        while let Some(event) = session.try_next_event() {
            print_sequencer_event(&event);
        }

        let Some(node_id) = session.first_active().await else {
            break;
        };
        let label = session
            .graph()
            .node(node_id)
            .map(|node| node.label)
            .unwrap_or(node_id);

        wait_for_keypress(&format!("   Press Enter to compute '{}'... ", label));
        if let Err(error) = session.trigger(node_id).await {
            println!("   ❌ Trigger rejected: {}", error);
            break;
        }

        loop {
            match session.next_event().await {
                Some(SequencerEvent::NodeRevealed { node_id: id, value }) if id == node_id => {
                    println!("   💡 {} = {}", label, format_vector(&value));
                    break;
                }
                Some(event) => print_sequencer_event(&event),
                None => return,
            }
        }
    }

    while let Some(event) = session.try_next_event() {
        print_sequencer_event(&event);
    }
}

fn print_sequencer_event(event: &SequencerEvent) {
    match event {
        SequencerEvent::NodeRevealed { node_id, value } => {
            println!("   💡 {} = {}", node_id, format_vector(value));
        }
        SequencerEvent::NodeActivated { node_ids } => {
            println!("   🔓 Now active: {}", node_ids.join(", "));
        }
        SequencerEvent::GraphResolved { architecture } => {
            println!("   🏁 {} graph fully resolved", architecture);
        }
    }
}

async fn run_single_scenario(
    scenario_file: &str,
    steps: u64,
    json_output: bool,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let scenario = load_scenario(scenario_file)?;
    let architecture = scenario.architecture;
    let params = scenario.params();

    ScenarioLoaded {
        path: scenario_file,
        architecture: architecture.display_name(),
        dimensionality: params.dimensionality,
    }
    .log();

    if !json_output {
        println!("📋 Scenario: {}", scenario_file);
        println!("🔧 Architecture: {}", architecture);
        println!("📐 Dimensionality: {}", params.dimensionality);
        println!(
            "🎚️  Biases: b1={} b2={} b3={}",
            params.bias1, params.bias2, params.bias3
        );
    }

    // Pretty runs reveal at the scenario's own latency; JSON output is for
    // machine consumers and skips the delay.
    let pacing: Arc<dyn RevealPacing> = if json_output {
        Arc::new(ImmediatePacing)
    } else {
        Arc::new(FixedPacing(scenario.reveal_latency()))
    };
    let mut session = SimulationSession::new(architecture, params, pacing);

    for _ in 0..steps {
        let step_number = session.step() + 1;
        if !json_output {
            println!("\n⏱️  Time step {}", step_number);
        }

        let mut revealed = 0;
        while !session.is_resolved().await {
            let Some(node_id) = session.first_active().await else {
                break;
            };
            let label = session
                .graph()
                .node(node_id)
                .map(|node| node.label)
                .unwrap_or(node_id);

            session.trigger(node_id).await?;
            let value = loop {
                match session.next_event().await {
                    Some(SequencerEvent::NodeRevealed { node_id: id, value }) if id == node_id => {
                        break value;
                    }
                    Some(_) => {}
                    None => anyhow::bail!("sequencer event channel closed mid-walkthrough"),
                }
            };

            revealed += 1;
            if json_output {
                println!(
                    "{}",
                    serde_json::json!({
                        "step": step_number,
                        "node": node_id,
                        "label": label,
                        "value": value,
                    })
                );
            } else {
                println!("  {:>2}. {:<24} {}", revealed, label, format_vector(&value));
            }
        }

        if !json_output {
            println!("\n📊 Step {} outputs:", step_number);
            println!(
                "   hidden' = {}",
                format_vector(&session.result().final_hidden)
            );
            if architecture.has_cell_state() {
                println!(
                    "   cell'   = {}",
                    format_vector(&session.result().final_cell)
                );
            }
        }

        session.advance().await?;
    }

    if json_output {
        println!(
            "{}",
            serde_json::json!({
                "completed_steps": session.step(),
                "hidden": session.params().hidden_prev,
                "cell": session.params().cell_prev,
            })
        );
    } else {
        println!("\n🎯 Carried state after {} step(s):", session.step());
        println!(
            "   hidden = {}",
            format_vector(&session.params().hidden_prev)
        );
        if architecture.has_cell_state() {
            println!("   cell   = {}", format_vector(&session.params().cell_prev));
        }
        println!(
            "\n⏱️  Total Time (including scenario load): {:?}",
            start_time.elapsed()
        );
    }

    Ok(())
}
