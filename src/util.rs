use clap::ArgMatches;
use serde_json::Value;

use crate::color::VertexId;
use crate::graph::ColoringGraph;

/** reads command line input and returns the instance name, the conflict
graph, the multiplicity, the time limit, and the optional solution / stats
filenames */
pub fn read_params(main_args:ArgMatches) -> (String, ColoringGraph, usize, f32, Option<String>, Option<String>) {
    let inst_filename = main_args.value_of("instance").unwrap();
    let f:usize = main_args.value_of("fold").unwrap().parse::<usize>()
        .expect("unable to parse the multiplicity given");
    let t:f32 = main_args.value_of("time").unwrap().parse::<f32>()
        .expect("unable to parse the time given");
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    // read instance file
    println!("reading instance: {}...", inst_filename);
    let instance = ColoringGraph::from_file(inst_filename);
    instance.display_statistics();
    println!("=======================");
    (inst_filename.to_string(), instance, f, t, sol_file, perf_file)
}

/// exports search results to files
pub fn export_results(
    instance:&ColoringGraph,
    solution:&[Vec<VertexId>],
    stats:&Value,
    perf_file:Option<String>,
    sol_file:Option<String>
) {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename.as_str(), serde_json::to_string(stats).unwrap())
            .unwrap_or_else(|why| panic!("couldn't write {}: {}", filename, why));
    }
    // export solution
    if let Some(filename) = sol_file {
        instance.write_solution(filename.as_str(), solution);
    }
}
