use std::process::Command;

const FRAMES: &str = r#"[
    {
        "timestamp": 0.0,
        "width": 1000,
        "height": 600,
        "objects": [
            {"label": "person", "bbox": [50, 100, 150, 300], "depth": 0.5},
            {"label": "car", "bbox": [400, 200, 600, 400], "depth": 0.85},
            {"label": "sky", "bbox": [0, 0, 1000, 100], "depth": 0.0}
        ]
    },
    {"timestamp": 1.0, "width": 1000, "height": 600, "objects": []},
    {"timestamp": 2.0, "width": 0, "height": 600, "objects": []}
]"#;

#[test]
fn guides_every_frame() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("frames.json");
    let output = dir.path().join("guide.jsonl");
    let config = dir.path().join("navigation.toml");
    std::fs::write(&input, FRAMES)?;
    std::fs::write(&config, "no_hazard_message = \"Path is clear.\"\n")?;

    let status = Command::new(env!("CARGO_BIN_EXE_spark-starlight"))
        .arg("--input")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .status()?;
    assert!(status.success());

    let lines: Vec<serde_json::Value> = std::fs::read_to_string(&output)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 3);

    assert_eq!(
        lines[0]["navigation_text"],
        "Warning! There are a car (very close) directly ahead and a person (quite close) to the left."
    );
    assert_eq!(lines[0]["priority_objects"].as_array().map(Vec::len), Some(2));
    assert_eq!(lines[1]["navigation_text"], "Path is clear.");
    assert_eq!(lines[2]["degraded"], true);
    assert_eq!(lines[2]["frame_index"], 2);
    Ok(())
}

#[test]
fn rejects_invalid_configuration() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("frames.json");
    std::fs::write(&input, FRAMES)?;

    let status = Command::new(env!("CARGO_BIN_EXE_spark-starlight"))
        .arg("--input")
        .arg(&input)
        .arg("--top-k")
        .arg("0")
        .status()?;
    assert!(!status.success());
    Ok(())
}
