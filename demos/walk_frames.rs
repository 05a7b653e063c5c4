use artline::{
    CameraState, EventRecord, EventTrack, RgbColor, TimelineConfig, TimelineEngine,
    TimelineEvent, TimelineRecord,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = TimelineConfig::from_json_str(include_str!("../tests/data/renaissance.json"))?;
    let records: Vec<TimelineRecord> = (1490..=1530)
        .map(|y| TimelineRecord::new(format!("{y}_panel"), 800.0, 600.0))
        .collect();
    let tracks = vec![EventTrack::new(
        "Luther",
        RgbColor::from_hex("#c83c28")?,
        vec![
            EventRecord::new("1517-10-31", "Ninety-five Theses"),
            EventRecord::new("1521-04-17", "Diet of Worms"),
        ],
    )];

    let mut engine = TimelineEngine::new(config, &records, tracks)?;
    let mut cam = CameraState::at(0.0);
    engine.set_zoom_target(1.0);

    for frame in 0..90 {
        cam.x += 0.75;
        let out = engine.frame(1.0 / 30.0, &mut cam)?;
        for ev in &out.events {
            if let TimelineEvent::FocusedYear(year) = ev {
                println!(
                    "frame {frame}: year {} ({} images, {} events, zoom {:.3})",
                    year.year,
                    year.images.len(),
                    year.events.len(),
                    out.zoom.progress
                );
            }
        }
    }

    Ok(())
}
