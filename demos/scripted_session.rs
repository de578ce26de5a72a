//! Replays a short AR session against a scripted platform and prints what the UI
//! would show each frame. Logs at debug level through tracing-subscriber.

#[path = "../tests/support/mod.rs"]
mod support;

use painting_ar::{ArConfig, ArExperience, SpawnDriver, SpawnHost, Vec3, config::PAINTING_IMAGE_ID};
use support::{ScriptedFrame, ScriptedXr};

struct Butterfly;

impl SpawnHost for Butterfly {
    fn spawn(&mut self, position: Vec3) {
        println!("  -> butterfly spawned at {position}");
    }

    fn despawn(&mut self) {
        println!("  -> butterfly removed");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ArConfig::from_json_str(
        r#"{
            "target": {
                "id": "butterfly-painting",
                "source": "/images/butterfly-painting.png",
                "physical_width_m": 0.5
            }
        }"#,
    )?;
    let ar = ArExperience::new(config, Some(ScriptedXr::granting()))?;
    let mut driver = SpawnDriver::new();
    let mut butterfly = Butterfly;

    let capability = pollster::block_on(ar.probe_capability());
    println!("capability: {capability:?} / {}", ar.status().message());

    pollster::block_on(ar.enter())?;

    let frames = [
        ScriptedFrame::new(1),
        ScriptedFrame::new(2).emulated(PAINTING_IMAGE_ID, Vec3::new(1.0, 0.0, -2.0)),
        ScriptedFrame::new(3).tracked(PAINTING_IMAGE_ID, Vec3::new(1.0, 0.0, -2.0)),
        ScriptedFrame::new(4).tracked(PAINTING_IMAGE_ID, Vec3::new(1.0, 0.0, -1.5)),
    ];
    for frame in &frames {
        let status = ar.tick(frame);
        driver.sync(ar.current_anchor(), &mut butterfly);
        println!("frame {}: {}", frame.index.0, status.message());
    }

    ar.exit();
    driver.sync(ar.current_anchor(), &mut butterfly);
    println!("after exit: {}", ar.status().message());
    Ok(())
}
