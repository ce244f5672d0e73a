use color_eyre::eyre::WrapErr;
use ticket_fields::answer::{solve, Answer};
use ticket_fields::config::Config;
use ticket_fields::logging;
use ticket_fields::puzzle::Puzzle;

fn run(config: &Config) -> color_eyre::Result<Answer> {
    let puzzle = Puzzle::from_file(&config.input_path)
        .wrap_err_with(|| format!("Failed to load {}", config.input_path.display()))?;
    solve(&puzzle, config).wrap_err("Failed to solve puzzle")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::default();
    logging::init(config.log_level)?;
    let answer = run(&config)?;
    println!("{}", answer.error_rate);
    println!("{}", answer.departure_product);
    Ok(())
}

#[cfg(all(test, feature = "test-util"))]
mod test {
    use std::path::PathBuf;
    use ticket_fields::puzzle::test_util::{DEPARTURE_EXAMPLE, UNSATISFIABLE_EXAMPLE};
    use super::*;

    fn write_input(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ticket-fields-{}-{}.txt", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_departure_example() {
        let path = write_input("departure", DEPARTURE_EXAMPLE);
        let config = Config { input_path: path.clone(), ..Config::default() };
        let answer = run(&config).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(answer.error_rate, 20);
        assert_eq!(answer.departure_product, 132);
    }

    #[test]
    fn test_run_reports_failures() {
        let missing = Config { input_path: PathBuf::from("/definitely/not/here.txt"), ..Config::default() };
        let report = run(&missing).unwrap_err();
        assert!(report.to_string().starts_with("Failed to load"));

        let path = write_input("unsatisfiable", UNSATISFIABLE_EXAMPLE);
        let config = Config { input_path: path.clone(), ..Config::default() };
        let report = run(&config).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report.to_string(), "Failed to solve puzzle");
    }
}
