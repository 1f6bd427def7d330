use std::time::Instant;

fn main() {
    env_logger::init();

    let mut cfg = coreclique::solver::SolverConfig::default();
    let mut path: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--layers" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.layer_num = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                if cfg.layer_num == 0 {
                    usage_and_exit(2);
                }
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            arg if !arg.starts_with('-') && path.is_none() => {
                path = Some(arg.to_string());
                i += 1;
            }
            _ => usage_and_exit(2),
        }
    }
    let Some(path) = path else { usage_and_exit(2) };

    let graph = match coreclique::graph::load_edge_list(&path) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    };

    let nodes = graph.vertex_count();
    let edges = graph.edge_count();
    println!("Network: {path}");
    println!("Top core layers: {}", cfg.layer_num);
    println!("Total nodes: {nodes}");
    println!("Total edges: {edges}");

    let start = Instant::now();
    let report = coreclique::solver::solve(graph, &cfg);
    let elapsed = start.elapsed();

    println!("Nodes removed by pruning: {}", report.pruned_vertices);
    println!("Total core layers found: {}", report.shell_count);
    println!(
        "First shell: {} nodes ({:.6} of total), {} edges ({:.6} of total)",
        report.stage1.vertices,
        ratio(report.stage1.vertices, nodes),
        report.stage1.edges,
        ratio(report.stage1.edges, edges),
    );
    match report.stage2 {
        None => println!("Search ended early after the first shell."),
        Some(stage2) => println!(
            "Second shell: {} nodes ({:.6} of total), {} edges ({:.6} of total)",
            stage2.vertices,
            ratio(stage2.vertices, nodes),
            stage2.edges,
            ratio(stage2.edges, edges),
        ),
    }
    println!("Maximum clique size: {}", report.max_clique);
    println!("Total runtime: {:.3} seconds", elapsed.as_secs_f64());
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  coreclique <edge-list> [--layers N]\n\nOptions:\n  <edge-list>   Text file with one undirected edge per line as `u,v` (1-indexed ids)\n  --layers N    Number of top core layers searched in the first stage (default: 4)\n"
    );
    std::process::exit(code)
}
