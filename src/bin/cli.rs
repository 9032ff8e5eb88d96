use mpm_tool::{
    ProjectSnapshot, TaskNetwork, TaskSpec, load_project_from_csv, load_project_from_json,
    save_project_to_csv, save_project_to_json, save_report_to_csv, save_report_to_json,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn parse_pred_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Boolean(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    // Compute column widths
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = cell_text(av);
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        out.push_str(&" ".repeat(widths[i] - name.len()));
        out.push_str(" |");
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default();
            out.push(' ');
            out.push_str(&s);
            out.push_str(&" ".repeat(widths[ci].saturating_sub(s.len())));
            out.push_str(" |");
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current task list\n  add <name> <duration> [preds_csv]  Upsert a task (preds like A,B)\n  delete <name>                      Remove a task\n  meta name <text...>                Set project name\n  meta desc <text...>                Set project description\n  compute                            Compute earliest/latest dates\n  path                               Show the critical path\n  save json|csv <path>               Save the project\n  load json|csv <path>               Load a project\n  export json|csv <path>             Export the computed schedule\n  quit|exit                          Exit"
    );
}

fn show_tasks(project: &ProjectSnapshot) {
    match TaskSpec::to_dataframe(&project.tasks) {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error rendering tasks: {}", e),
    }
}

fn upsert_task(project: &mut ProjectSnapshot, task: TaskSpec) {
    match project.tasks.iter_mut().find(|t| t.name == task.name) {
        Some(existing) => *existing = task,
        None => project.tasks.push(task),
    }
}

fn compute(project: &ProjectSnapshot) {
    let mut network = match TaskNetwork::from_tasks(&project.tasks) {
        Ok(network) => network,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let report = match network.report() {
        Ok(report) => report,
        Err(e) => {
            println!("Compute error: {}", e);
            return;
        }
    };
    match report.to_dataframe() {
        Ok(df) => println!(
            "Computed ({})\n{}",
            report.to_cli_summary(),
            render_df_as_text_table(&df)
        ),
        Err(e) => println!("Error rendering schedule: {}", e),
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut project = ProjectSnapshot::default();

    println!("MPM Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show_tasks(&project),
            "add" => {
                let name_s = parts.next();
                let dur_s = parts.next();
                let preds_s = parts.next();
                match (name_s, dur_s) {
                    (Some(name), Some(dur_s)) => {
                        let duration: i64 = match dur_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid duration");
                                continue;
                            }
                        };
                        let preds = preds_s.map(parse_pred_list).unwrap_or_default();
                        upsert_task(
                            &mut project,
                            TaskSpec::new(name, duration).with_predecessors(preds),
                        );
                        println!("Task upserted.");
                        show_tasks(&project);
                    }
                    _ => println!("Usage: add <name> <duration> [preds_csv]"),
                }
            }
            "delete" => match parts.next() {
                Some(name) => {
                    let before = project.tasks.len();
                    project.tasks.retain(|t| t.name != name);
                    if project.tasks.len() < before {
                        println!("Deleted task {name}.");
                        show_tasks(&project);
                    } else {
                        println!("Task {name} not found.");
                    }
                }
                None => println!("Usage: delete <name>"),
            },
            "meta" => {
                let field = parts.next();
                let text = parts.collect::<Vec<_>>().join(" ");
                match field {
                    Some("name") if !text.is_empty() => {
                        project.metadata.project_name = text;
                        println!("Project name set.");
                    }
                    Some("desc") if !text.is_empty() => {
                        project.metadata.project_description = text;
                        println!("Project description set.");
                    }
                    _ => println!("Usage: meta name|desc <text...>"),
                }
            }
            "compute" => compute(&project),
            "path" => match TaskNetwork::from_tasks(&project.tasks) {
                Ok(mut network) => match network.critical_path() {
                    Ok(path) => println!("Critical path: {}", path.join(" -> ")),
                    Err(e) => println!("Compute error: {}", e),
                },
                Err(e) => println!("Error: {}", e),
            },
            "save" | "load" | "export" => {
                let format = parts.next();
                let path = parts.next();
                let (format, path) = match (format, path) {
                    (Some(f @ ("json" | "csv")), Some(p)) => (f, p),
                    _ => {
                        println!("Usage: {} json|csv <path>", cmd);
                        continue;
                    }
                };
                match (cmd, format) {
                    ("save", "json") => match save_project_to_json(&project, path) {
                        Ok(()) => println!("Project saved to {path}."),
                        Err(e) => println!("Save error: {}", e),
                    },
                    ("save", _) => match save_project_to_csv(&project, path) {
                        Ok(()) => println!("Project saved to {path}."),
                        Err(e) => println!("Save error: {}", e),
                    },
                    ("load", _) => {
                        let loaded = if format == "json" {
                            load_project_from_json(path)
                        } else {
                            load_project_from_csv(path)
                        };
                        match loaded {
                            Ok(snapshot) => {
                                project = snapshot;
                                println!("Project loaded from {path}.");
                                show_tasks(&project);
                            }
                            Err(e) => println!("Load error: {}", e),
                        }
                    }
                    _ => {
                        let report = TaskNetwork::from_tasks(&project.tasks)
                            .map_err(mpm_tool::PersistenceError::from)
                            .and_then(|mut network| Ok(network.report()?));
                        let written = report.and_then(|report| {
                            if format == "json" {
                                save_report_to_json(&report, path)
                            } else {
                                save_report_to_csv(&report, path)
                            }
                        });
                        match written {
                            Ok(()) => println!("Schedule exported to {path}."),
                            Err(e) => println!("Export error: {}", e),
                        }
                    }
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
