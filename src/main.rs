use std::time::Instant;

use clap::{App, load_yaml};
use dogs::search_algorithm::TimeStoppingCriterion;
use serde_json::json;

use fold_color::color::{checker, CheckerResult};
use fold_color::search::fold_backtracking::find_fold_coloring;
use fold_color::util::{read_params, export_results};


/** solves an f-fold coloring instance exactly */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let (
        inst_filename,
        instance,
        f,
        t,
        sol_file,
        perf_file
    ) = read_params(main_args);

    // solve it
    let t_start = Instant::now();
    let stopping_criterion = TimeStoppingCriterion::new(t);
    match find_fold_coloring(&instance, f, stopping_criterion) {
        None => {
            println!("time limit reached before the coloring number was proven");
        }
        Some((nb_colors, solution)) => {
            let duration = t_start.elapsed().as_secs_f32();
            match checker(&instance, f, &solution) {
                CheckerResult::Ok(_) => {},
                res => panic!("solver reported an invalid coloring: {:?}", res),
            }
            println!("search took {:.3} seconds. Coloring number: {}", duration, nb_colors);
            let stats = json!({
                "nb_colors": nb_colors,
                "multiplicity": f,
                "time_searched": duration,
                "inst_name": inst_filename
            });

            // export results
            export_results(&instance, &solution, &stats, perf_file, sol_file);
        }
    }
}
