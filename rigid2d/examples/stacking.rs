// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Stacking demo
//!
//! Drops a column of boxes and a few balls onto a static floor, with a
//! "coin" that removes itself when touched, and prints the resting state.
//!
//! Run with `RUST_LOG=rigid2d=debug` to see per-tick spans and purges, or
//! `RUST_LOG=rigid2d=trace` for every resolved contact.

use rigid2d::{RigidBody, Simulator, SimulatorConfig, Vector2D, World};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("rigid2d - Stacking Demo");
    println!("=======================\n");

    let config = SimulatorConfig::default().with_gravity(Vector2D::new(0.0, 0.4));
    let sim = match Simulator::try_new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    let mut world = World::new();
    world.insert(
        RigidBody::rectangle(400.0, 20.0)
            .with_position(Vector2D::new(0.0, 300.0))
            .with_static(true),
    );
    world.insert(
        RigidBody::rectangle(20.0, 200.0)
            .with_position(Vector2D::new(-150.0, 200.0))
            .with_static(true),
    );

    let boxes: Vec<_> = (0..4)
        .map(|i| {
            world.insert(
                RigidBody::rectangle(30.0, 30.0)
                    .with_position(Vector2D::new(0.0, 250.0 - i as f64 * 45.0))
                    .with_friction(0.1),
            )
        })
        .collect();

    let balls: Vec<_> = (0..3)
        .map(|i| {
            world.insert(
                RigidBody::ellipse(16.0, 16.0)
                    .with_position(Vector2D::new(-100.0 + i as f64 * 20.0, 50.0 - i as f64 * 30.0))
                    .with_velocity(Vector2D::new(-1.5, 0.0))
                    .with_elasticity(0.3),
            )
        })
        .collect();

    let collected = Arc::new(AtomicUsize::new(0));
    let counter = collected.clone();
    let coin = world.insert(
        RigidBody::ellipse(10.0, 10.0)
            .with_position(Vector2D::new(60.0, 280.0))
            .with_static(true)
            .with_rigid_body(false)
            .with_on_collide(move |coin: &mut RigidBody, _other: &RigidBody, contact: Vector2D| {
                counter.fetch_add(1, Ordering::SeqCst);
                println!("  coin picked up at {contact}");
                coin.mark_deleted();
            }),
    );
    world.insert(
        RigidBody::ellipse(12.0, 12.0)
            .with_position(Vector2D::new(120.0, 100.0))
            .with_velocity(Vector2D::new(-2.0, 0.0)),
    );

    println!("Simulating {} bodies for 300 ticks...", world.len());
    for tick in 0..300 {
        world.step(&sim);
        if tick % 100 == 0 {
            println!("  tick {tick:3}: {} bodies", world.len());
        }
    }

    println!("\nBoxes:");
    for handle in &boxes {
        if let Some(body) = world.get(*handle) {
            println!("  {handle}: position {} velocity {}", body.position(), body.velocity());
        }
    }

    println!("\nBalls:");
    for handle in &balls {
        if let Some(body) = world.get(*handle) {
            println!("  {handle}: position {} velocity {}", body.position(), body.velocity());
        }
    }

    println!(
        "\nCoin collected: {} (still in world: {})",
        collected.load(Ordering::SeqCst) > 0,
        world.contains(coin)
    );
}
