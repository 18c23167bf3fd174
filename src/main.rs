//! rCleanOps main entrypoint.

use rcleanops::run;
use rcleanops::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
