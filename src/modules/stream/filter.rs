use std::path::{Path, PathBuf};
use tracing::warn;

use crate::modules::overlay::model::{Overlay, OverlayKind};

/// Label of the decoded base video stream, ffmpeg input 0.
const BASE_VIDEO_LABEL: &str = "[0:v]";

/// Everything the transcoder needs to composite one snapshot of the overlay
/// list: extra `-i` inputs (one per usable logo) and the `-filter_complex`
/// expression. An empty expression means no filter stage at all.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterPlan {
    pub extra_inputs: Vec<PathBuf>,
    pub filter_expression: String,
}

enum FilterStep {
    Logo {
        input_index: usize,
        x: i32,
        y: i32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        font_size: i32,
    },
}

/// Builds the compositing plan for an ordered overlay list.
///
/// Logos are layered first, then text captions, each group keeping its own
/// relative order. A logo whose asset does not resolve contributes neither
/// an input nor a filter step. The final step writes to the unlabeled
/// terminal output; "final" is computed over steps actually emitted, so a
/// trailing skipped logo cannot leave a dangling labeled output.
pub fn build_filter_plan<F>(overlays: &[Overlay], resolve_asset: F) -> FilterPlan
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let logos = overlays
        .iter()
        .filter(|o| o.kind == OverlayKind::Logo && !o.content.is_empty());
    let texts = overlays.iter().filter(|o| o.kind == OverlayKind::Text);

    let mut extra_inputs: Vec<PathBuf> = Vec::new();
    let mut steps: Vec<FilterStep> = Vec::new();

    for overlay in logos {
        match resolve_asset(&overlay.content) {
            Some(path) => {
                extra_inputs.push(path);
                // Input 0 is the base video, so logo inputs start at 1.
                steps.push(FilterStep::Logo {
                    input_index: extra_inputs.len(),
                    x: overlay.position_x,
                    y: overlay.position_y,
                });
            }
            None => {
                warn!(
                    "Logo asset not found, skipping overlay {}: {}",
                    overlay.id, overlay.content
                );
            }
        }
    }

    for overlay in texts {
        steps.push(FilterStep::Text {
            text: escape_drawtext(&overlay.content),
            x: overlay.position_x,
            y: overlay.position_y,
            font_size: overlay.height,
        });
    }

    let mut parts = Vec::with_capacity(steps.len());
    let mut current = BASE_VIDEO_LABEL.to_string();

    for (index, step) in steps.iter().enumerate() {
        let is_last = index + 1 == steps.len();
        let out_label = if is_last {
            String::new()
        } else {
            format!("[v{index}]")
        };

        let part = match step {
            FilterStep::Logo { input_index, x, y } => {
                format!("{current}[{input_index}:v]overlay={x}:{y}{out_label}")
            }
            FilterStep::Text {
                text,
                x,
                y,
                font_size,
            } => format!(
                "{current}drawtext=text='{text}':x={x}:y={y}:fontsize={font_size}:\
                 fontcolor=white:box=1:boxcolor=black@0.5{out_label}"
            ),
        };
        parts.push(part);

        if !is_last {
            current = out_label;
        }
    }

    FilterPlan {
        extra_inputs,
        filter_expression: parts.join(";"),
    }
}

/// Escapes caption text for use inside a quoted drawtext argument: a
/// literal quote closes and reopens the quoted string, and a colon would
/// otherwise terminate the argument.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\'', "'\\''").replace(':', "\\:")
}

/// Maps an overlay's stored content path to a file under the asset root,
/// or `None` when the asset is missing on disk.
pub fn resolve_asset(asset_root: &Path, content: &str) -> Option<PathBuf> {
    let path = asset_root.join(content.trim_start_matches('/'));
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn overlay(kind: OverlayKind, content: &str, x: i32, y: i32, height: i32) -> Overlay {
        let now = OffsetDateTime::now_utc();
        Overlay {
            id: Uuid::new_v4(),
            kind,
            content: content.to_string(),
            position_x: x,
            position_y: y,
            width: 0,
            height,
            created_at: now,
            updated_at: now,
        }
    }

    fn resolve_none(_: &str) -> Option<PathBuf> {
        None
    }

    fn resolve_all(content: &str) -> Option<PathBuf> {
        Some(PathBuf::from(format!("/assets/{content}")))
    }

    #[test]
    fn empty_overlay_list_produces_empty_plan() {
        let plan = build_filter_plan(&[], resolve_all);
        assert!(plan.extra_inputs.is_empty());
        assert!(plan.filter_expression.is_empty());
    }

    #[test]
    fn logos_with_missing_assets_are_not_qualifying() {
        let overlays = vec![
            overlay(OverlayKind::Logo, "gone.png", 0, 0, 0),
            overlay(OverlayKind::Logo, "", 0, 0, 0),
        ];
        let plan = build_filter_plan(&overlays, resolve_none);
        assert!(plan.extra_inputs.is_empty());
        assert!(plan.filter_expression.is_empty());
    }

    #[test]
    fn text_only_list_emits_one_step_per_caption_and_no_inputs() {
        let overlays = vec![
            overlay(OverlayKind::Text, "hello", 10, 20, 24),
            overlay(OverlayKind::Text, "world", 30, 40, 32),
        ];
        let plan = build_filter_plan(&overlays, resolve_none);

        assert!(plan.extra_inputs.is_empty());
        assert_eq!(plan.filter_expression.matches("drawtext").count(), 2);
        assert_eq!(plan.filter_expression.matches(';').count(), 1);
    }

    #[test]
    fn missing_logo_asset_skips_input_and_step() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"png").unwrap();
        fs::write(dir.path().join("c.png"), b"png").unwrap();

        let overlays = vec![
            overlay(OverlayKind::Logo, "a.png", 0, 0, 0),
            overlay(OverlayKind::Logo, "b.png", 0, 0, 0),
            overlay(OverlayKind::Logo, "c.png", 5, 6, 0),
        ];
        let plan = build_filter_plan(&overlays, |content| resolve_asset(dir.path(), content));

        assert_eq!(plan.extra_inputs.len(), 2);
        assert_eq!(plan.extra_inputs[0], dir.path().join("a.png"));
        assert_eq!(plan.extra_inputs[1], dir.path().join("c.png"));
        // The surviving logos consume consecutive input indexes.
        assert_eq!(
            plan.filter_expression,
            "[0:v][1:v]overlay=0:0[v0];[v0][2:v]overlay=5:6"
        );
    }

    #[test]
    fn logos_are_composited_before_text() {
        let overlays = vec![
            overlay(OverlayKind::Logo, "a.png", 10, 20, 0),
            overlay(OverlayKind::Text, "caption", 50, 60, 28),
            overlay(OverlayKind::Logo, "c.png", 30, 40, 0),
        ];
        let plan = build_filter_plan(&overlays, resolve_all);

        assert_eq!(
            plan.extra_inputs,
            vec![PathBuf::from("/assets/a.png"), PathBuf::from("/assets/c.png")]
        );
        assert_eq!(
            plan.filter_expression,
            "[0:v][1:v]overlay=10:20[v0];\
             [v0][2:v]overlay=30:40[v1];\
             [v1]drawtext=text='caption':x=50:y=60:fontsize=28:\
             fontcolor=white:box=1:boxcolor=black@0.5"
        );
    }

    #[test]
    fn single_logo_writes_to_terminal_output() {
        let overlays = vec![overlay(OverlayKind::Logo, "logo.png", 10, 20, 0)];
        let plan = build_filter_plan(&overlays, resolve_all);
        assert_eq!(plan.filter_expression, "[0:v][1:v]overlay=10:20");
    }

    #[test]
    fn trailing_skipped_logo_leaves_no_dangling_label() {
        let overlays = vec![
            overlay(OverlayKind::Logo, "present.png", 1, 2, 0),
            overlay(OverlayKind::Logo, "missing.png", 3, 4, 0),
        ];
        let plan = build_filter_plan(&overlays, |content| {
            (content == "present.png").then(|| PathBuf::from("/assets/present.png"))
        });

        // The surviving step is the last emitted step and must write to the
        // terminal output, not an intermediate label.
        assert_eq!(plan.filter_expression, "[0:v][1:v]overlay=1:2");
    }

    #[test]
    fn drawtext_escaping_handles_quotes_and_colons() {
        assert_eq!(escape_drawtext("it's 10:30"), "it'\\''s 10\\:30");
        assert_eq!(escape_drawtext("plain text"), "plain text");
    }

    #[test]
    fn escaped_text_lands_in_the_expression() {
        let overlays = vec![overlay(OverlayKind::Text, "now: 'live'", 0, 0, 20)];
        let plan = build_filter_plan(&overlays, resolve_none);
        assert!(plan
            .filter_expression
            .contains("text='now\\: '\\''live'\\'''"));
    }

    #[test]
    fn resolve_asset_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"png").unwrap();

        assert_eq!(
            resolve_asset(dir.path(), "/logo.png"),
            Some(dir.path().join("logo.png"))
        );
        assert_eq!(resolve_asset(dir.path(), "nope.png"), None);
    }
}
