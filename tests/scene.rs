use pipevis::layout::{connector_y, line_color, output_spacing, region_for};
use pipevis::pipeline::Pipeline;
use pipevis::scene::{HIGHLIGHT_STROKE_WIDTH, STAGE_STROKE_WIDTH, Shape, build_scene};
use pipevis::tool::Tool;

fn make_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Tool::source("hello\nworld"),
        Tool::filter("l+").unwrap(),
        Tool::sink(),
    ])
    .unwrap()
}

#[test]
fn test_scene_shape_counts() {
    let pipeline = make_pipeline();
    let trace = pipeline.evaluate();
    let shapes = build_scene(&pipeline, &trace, None);

    let rects = shapes.iter().filter(|s| matches!(s, Shape::Rect { .. })).count();
    let segments = shapes.iter().filter(|s| matches!(s, Shape::Segment { .. })).count();
    // One rectangle per stage; two connectors each for stage 0 and
    // stage 1, none for the sink.
    assert_eq!(rects, 3);
    assert_eq!(segments, 4);
}

#[test]
fn test_highlight_stroke_width() {
    let pipeline = make_pipeline();
    let trace = pipeline.evaluate();
    let shapes = build_scene(&pipeline, &trace, Some(1));

    let widths: Vec<f32> = shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Rect { stroke_width, .. } => Some(*stroke_width),
            _ => None,
        })
        .collect();
    assert_eq!(
        widths,
        vec![STAGE_STROKE_WIDTH, HIGHLIGHT_STROKE_WIDTH, STAGE_STROKE_WIDTH]
    );
}

#[test]
fn test_rect_fills_follow_kind_colors() {
    let pipeline = make_pipeline();
    let trace = pipeline.evaluate();
    let fills: Vec<Option<&'static str>> = build_scene(&pipeline, &trace, None)
        .into_iter()
        .filter_map(|s| match s {
            Shape::Rect { fill, .. } => Some(fill),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![Some("purple"), Some("blue"), None]);
}

#[test]
fn test_connector_geometry_and_color() {
    let pipeline = make_pipeline();
    let trace = pipeline.evaluate();
    let shapes = build_scene(&pipeline, &trace, None);

    let region = region_for(0);
    let spacing = output_spacing(2);
    let first_segment = shapes
        .iter()
        .find_map(|s| match s {
            Shape::Segment { x1, y1, x2, y2, stroke, .. } => {
                Some((*x1, *y1, *x2, *y2, stroke.clone()))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(first_segment.0, region.max_x());
    assert_eq!(first_segment.1, connector_y(0, spacing));
    assert_eq!(first_segment.2, region.sink_min_x);
    assert_eq!(first_segment.3, first_segment.1);
    assert_eq!(first_segment.4, line_color("hello"));
}

#[test]
fn test_scene_serializes_to_json() {
    let pipeline = make_pipeline();
    let trace = pipeline.evaluate();
    let shapes = build_scene(&pipeline, &trace, None);
    let json = serde_json::to_string(&shapes).unwrap();
    assert!(json.contains("\"shape\":\"rect\""));
    assert!(json.contains("\"shape\":\"segment\""));
}
