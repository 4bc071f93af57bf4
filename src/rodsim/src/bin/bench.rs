use std::time::SystemTime;

use rodsim::config::{RodConfig, SwarmConfig};
use rodsim::world::RodWorld;
use rodsim::V3;
use tracing::{error, info};

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let config = RodConfig {
		gravity: [0., -9.81, 0.],
		sides: 8,
		..Default::default()
	};
	let dt = config.dt;
	let start = V3::new(-2., 0., 0.);
	let end = V3::new(2., 0., 0.);
	let world = RodWorld::new(config, start, end)
		.and_then(|world| world.with_swarm(&SwarmConfig::default()));
	let mut world = match world {
		Ok(world) => world,
		Err(e) => {
			error!(error = %e, "bad config");
			std::process::exit(1);
		}
	};

	let begin = SystemTime::now();
	let frames = 1000;
	for frame in 0..frames {
		// swing the end anchor in a slow circle
		let a = frame as f32 * dt;
		let end = end + V3::new(0., a.sin(), a.cos() - 1.);
		world.fixed_update(start, end);
	}
	let simulated = frames as f32 * dt;
	let elapsed = SystemTime::now()
		.duration_since(begin)
		.map(|d| d.as_secs_f32())
		.unwrap_or_default();
	info!(
		frames,
		vertices = world.mesh().vertices.len(),
		load = %format!("{:.3}%", elapsed / simulated * 100.),
		"bench done"
	);
}
