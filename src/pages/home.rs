use std::f64::consts::PI;

use leptos::prelude::*;

use crate::animation::{
	GraphNode, LinkRecord, NodePosition, StepRecord, Timeline, TimelineError,
};
use crate::components::relations_graph::RelationsGraph;

const COUNTRIES: &[&str] = &[
	"Greece",
	"France",
	"United States",
	"Great Britain",
	"Germany",
	"Hungary",
	"Austria",
	"Denmark",
	"Switzerland",
	"Sweden",
	"Italy",
	"Belgium",
	"Netherlands",
	"Norway",
	"Finland",
	"Canada",
	"Australia",
	"Japan",
	"Soviet Union",
	"China",
	"Brazil",
	"Kenya",
	"Individual Olympic Athletes",
];

const PERIODS: &[&str] = &["1896-1936", "1948-1968", "1972-1992", "1996-2016"];

const CLUSTERS: usize = 5;
const CLUSTER_RADIUS: f64 = 380.0;
const CLUSTER_SPREAD: f64 = 180.0;

/// Sample country-relations timeline (deterministic, clustered positions).
fn sample_timeline() -> Result<Timeline, TimelineError> {
	let nodes = COUNTRIES
		.iter()
		.map(|name| {
			let mut node = GraphNode::new(*name);
			if *name == "Individual Olympic Athletes" {
				node.color = Some("black".into());
			}
			node
		})
		.collect();
	let steps = PERIODS
		.iter()
		.enumerate()
		.map(|(step, period)| sample_step(step, period))
		.collect();
	Timeline::new(nodes, steps)
}

fn sample_step(step: usize, label: &str) -> StepRecord {
	let n = COUNTRIES.len();
	let cluster_of = |i: usize| (i + step) % CLUSTERS;

	let mut links = Vec::new();
	let mut outdegree = vec![0u32; n];
	for i in 0..n {
		let seed = i * 31 + step * 7;
		if rand_simple(seed) < 0.3 {
			continue;
		}
		let peers: Vec<usize> = (0..n)
			.filter(|&j| j != i && cluster_of(j) == cluster_of(i))
			.collect();
		if peers.is_empty() {
			continue;
		}
		let j = peers[(rand_simple(seed + 1) * peers.len() as f64) as usize % peers.len()];
		links.push(LinkRecord::new(COUNTRIES[i], COUNTRIES[j]));
		outdegree[i] += 1;
	}

	let positions = (0..n)
		.map(|i| {
			let angle = cluster_of(i) as f64 * 2.0 * PI / CLUSTERS as f64 + step as f64 * 0.4;
			let seed = i * 13 + step * 101;
			let (ox, oy) = (
				(rand_simple(seed) - 0.5) * CLUSTER_SPREAD,
				(rand_simple(seed + 3) - 0.5) * CLUSTER_SPREAD,
			);
			NodePosition::new(
				COUNTRIES[i],
				CLUSTER_RADIUS * angle.cos() + ox,
				CLUSTER_RADIUS * angle.sin() + oy,
				outdegree[i],
			)
		})
		.collect();

	StepRecord {
		label: Some(label.to_owned()),
		positions,
		links,
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{sample_timeline()
					.map(|timeline| view! { <RelationsGraph timeline=timeline fullscreen=true /> })}
				<div class="graph-overlay">
					<h1>"Country Relations"</h1>
					<p class="subtitle">"Pick a period to watch countries drift to their new positions."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
