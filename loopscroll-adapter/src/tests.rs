use crate::*;

use loopscroll::{
    Axis, ChildSizes, Error, LayoutOptions, ScrollView, ScrollViewOptions, Vec2,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::format;
use std::string::String;
use std::vec::Vec;

fn message_view(ids: Vec<u64>) -> ScrollView<MemoryHost, u64> {
    let mut host = MemoryHost::new();
    let row = host.register(TemplateSpec::new("row", Vec2::new(100.0, 20.0)));
    let options = ScrollViewOptions::new(Vec2::new(100.0, 100.0)).with_default_template(row);
    let mut view = ScrollView::new(host, options);
    view.init_by_payload(
        None,
        |host: &mut MemoryHost, el: ElementId, id: &u64| {
            host.set_content(el, format!("message {id}"));
        },
        None,
    )
    .unwrap();
    view.refresh_view_by_payload(ids).unwrap();
    view
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-2,
        "expected {expected}, got {actual}"
    );
}

fn assert_host_matches_view(view: &ScrollView<MemoryHost, u64>) {
    let host = view.host();
    assert_eq!(host.shown().count(), view.rendered_len());
    view.for_each_rendered(|index, el| {
        let node = host.element(el).unwrap();
        assert_eq!(node.parent, Parent::Content);
        assert_eq!(node.content, format!("message {}", view.payload(index).unwrap()));
        assert_eq!(node.placed, view.cell(index).unwrap().rect);
    });

    let parked = host
        .elements()
        .filter(|(_, node)| node.parent == Parent::PoolContainer)
        .count();
    let template = view.pool().default_template().copied().unwrap();
    assert_eq!(parked, view.pool().stats(&template).idle);
    assert_eq!(host.live_count(), view.pool().len());
}

#[test]
fn memory_host_shows_exactly_the_rendered_elements() {
    let mut view = message_view((0..50).collect());
    assert_eq!(view.visible_indices(), &[0, 1, 2, 3, 4]);
    assert_host_matches_view(&view);

    for y in [0.5, 0.51, 1.0, 0.2, 0.0] {
        view.on_scroll(Vec2::new(0.0, y)).unwrap();
        assert_host_matches_view(&view);
    }
    assert!(view.host().created_count() <= 7);
}

#[test]
fn anchor_preserves_position_across_prepend() {
    let ids: Vec<u64> = (1000..1100).collect();
    let mut view = message_view(ids.clone());
    view.on_scroll(Vec2::new(0.0, 1010.0 / 1900.0)).unwrap();
    assert_eq!(view.visible_indices().first(), Some(&50));

    let anchor = capture_first_visible_anchor(&view, |i| ids[i]).unwrap();
    assert_eq!(anchor.key, 1050);
    assert_close(anchor.offset_in_viewport, 10.0);

    // Prepend 10 items: old items shift by +10 indexes.
    let prepended: Vec<u64> = (2000..2010).chain(1000..1100).collect();
    let index_of: HashMap<u64, usize> = prepended
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();
    view.refresh_view_by_payload(prepended).unwrap();

    assert_eq!(
        apply_anchor(&mut view, &anchor, |key| index_of.get(key).copied()),
        Ok(true)
    );
    assert_close(view.viewport_rect().y, 1210.0);
    assert_eq!(view.visible_indices().first(), Some(&60));
    assert_eq!(view.host().scroll_position(), Some(view.scroll_position()));
    assert_host_matches_view(&view);
}

#[test]
fn anchor_with_missing_key_is_not_applied() {
    let mut view = message_view((0..30).collect());
    view.on_scroll(Vec2::new(0.0, 0.25)).unwrap();
    let anchor = capture_anchor_for_index(&view, 3, |i| i as u64).unwrap();
    assert_close(anchor.offset_in_viewport, 0.25 * 500.0 - 60.0);

    view.refresh_view_by_payload((100..130).collect()).unwrap();
    let before = view.scroll_position();
    assert_eq!(apply_anchor(&mut view, &anchor, |_| None), Ok(false));
    assert_eq!(view.scroll_position(), before);
    assert_eq!(view.host().scroll_position(), None);
}

#[test]
fn refused_template_surfaces_the_host_error() {
    let mut host = MemoryHost::new();
    let broken = host.register(TemplateSpec::new("broken", Vec2::new(10.0, 10.0)).refusing());
    let mut view: ScrollView<MemoryHost> = ScrollView::new(
        host,
        ScrollViewOptions::new(Vec2::new(100.0, 100.0)).with_default_template(broken),
    );
    view.init_by_index(None, |_: &mut MemoryHost, _: ElementId, _: usize| {}, None)
        .unwrap();

    assert_eq!(
        view.refresh_view_by_count(3),
        Err(Error::CreateFailed(String::from(
            "template `broken` refused to instantiate"
        )))
    );
    assert_eq!(view.host().created_count(), 0);
}

#[test]
fn measured_content_wraps_into_taller_rows() {
    let mut host = MemoryHost::new();
    let text = host.register(
        TemplateSpec::new("text", Vec2::new(100.0, 20.0)).with_measure(|content, axis| {
            match axis {
                Axis::Horizontal => ChildSizes::new(50.0, 100.0, 0.0),
                Axis::Vertical => {
                    let lines = content.len().div_ceil(10).max(1) as f32;
                    ChildSizes::fixed(20.0 * lines)
                }
            }
        }),
    );
    let layout = LayoutOptions::vertical().with_control_child_size(true, true);
    let mut view: ScrollView<MemoryHost> = ScrollView::new(
        host,
        ScrollViewOptions::new(Vec2::new(100.0, 100.0))
            .with_default_template(text)
            .with_layout(layout),
    );
    view.init_by_index(
        None,
        |host: &mut MemoryHost, el: ElementId, i: usize| host.set_content(el, "x".repeat(i * 5)),
        None,
    )
    .unwrap();
    view.refresh_view_by_count(6).unwrap();

    let rows: Vec<(f32, f32)> = (0..6)
        .map(|i| {
            let cell = view.cell(i).unwrap();
            (cell.offset(Axis::Vertical), cell.size(Axis::Vertical))
        })
        .collect();
    let expected: [(f32, f32); 6] = [
        (0.0, 20.0),
        (20.0, 20.0),
        (40.0, 20.0),
        (60.0, 40.0),
        (100.0, 40.0),
        (140.0, 60.0),
    ];
    assert_eq!(rows, expected);
    assert_eq!(view.content_size(), Vec2::new(100.0, 200.0));
    assert_eq!(view.cell(5).unwrap().size(Axis::Horizontal), 100.0);
    assert_eq!(view.visible_indices(), &[0, 1, 2, 3]);
}

#[test]
fn smooth_scroll_pushes_every_frame_to_the_host() {
    let mut view = message_view((0..100).collect());
    let target = view.smooth_scroll_to_index(45, 0).unwrap();
    assert_eq!(target, Vec2::new(0.0, 900.0 / 1900.0));

    let mut now_ms = 0;
    let mut frames = Vec::new();
    while let Some(position) = view.tick(now_ms).unwrap() {
        assert_eq!(view.host().scroll_position(), Some(position));
        assert_host_matches_view(&view);
        frames.push(position.y);
        now_ms += 16;
    }

    assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(frames.last().copied(), Some(target.y));
    assert_eq!(frames.len(), 8);
    assert!(view.is_rendered(45));
}

#[test]
fn teardown_destroys_every_element_and_the_pool_container() {
    let mut view = message_view((0..100).collect());
    view.scroll_to_index(60).unwrap();
    view.scroll_to_index(10).unwrap();

    let host = view.teardown();
    assert!(host.created_count() > 0);
    assert_eq!(host.destroyed_count(), host.created_count());
    assert_eq!(host.live_count(), 0);
    assert!(!host.has_pool_container());
    assert!(
        host.elements()
            .all(|(_, node)| node.parent == Parent::Destroyed && !node.active)
    );
}
