//! Browser entry point.

use leptos::mount::mount_to_body;
use relations_timeline::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
