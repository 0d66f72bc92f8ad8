use super::filter::FilterPlan;

/// Fixed encode policy for the broadcast output: constant 30 fps, keyframe
/// every 60 frames, no B-frames, x264 tuned for low latency, AAC audio,
/// FLV container. Downstream consumers depend on these exact settings.
const ENCODE_ARGS: [&str; 20] = [
    "-r", "30",
    "-c:v", "libx264",
    "-preset", "veryfast",
    "-tune", "zerolatency",
    "-g", "60",
    "-bf", "0",
    "-b:v", "1000k",
    "-c:a", "aac",
    "-ar", "44100",
    "-f", "flv",
];

/// Assembles the full transcoder argument list: base input, extra overlay
/// inputs, the filter stage when non-empty, the fixed encode policy, and
/// the broadcast destination. Arguments stay a structured list until the
/// spawn boundary.
pub fn transcode_args(source_url: &str, plan: &FilterPlan, publish_url: &str) -> Vec<String> {
    let mut args = vec![
        "-loglevel".to_string(),
        "verbose".to_string(),
        "-i".to_string(),
        source_url.to_string(),
    ];

    for input in &plan.extra_inputs {
        args.push("-i".to_string());
        args.push(input.display().to_string());
    }

    if !plan.filter_expression.is_empty() {
        args.push("-filter_complex".to_string());
        args.push(plan.filter_expression.clone());
    }

    args.extend(ENCODE_ARGS.iter().map(|s| s.to_string()));
    args.push(publish_url.to_string());
    args
}
