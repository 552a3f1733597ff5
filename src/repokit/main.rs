use repokit::error::RepokitError;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if let RepokitError::CommandExecution { stdout, stderr, .. } = &e {
            if !stdout.trim().is_empty() {
                eprintln!("--- stdout ---\n{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                eprintln!("--- stderr ---\n{}", stderr.trim_end());
            }
        }
        std::process::exit(1);
    }
}
