use std::collections::HashMap;

use loopscroll::{ScrollView, ScrollViewOptions, Vec2};
use loopscroll_adapter::{
    ElementId, MemoryHost, TemplateSpec, apply_anchor, capture_first_visible_anchor,
};

fn main() {
    // Example: preserve visual scroll position across "prepend" (chat/timeline load older messages).
    //
    // The adapter flow is typically:
    // 1) capture an anchor (key + offset_in_viewport) before data changes
    // 2) apply data changes
    // 3) apply the anchor so the same item stays in the same place
    let mut host = MemoryHost::new();
    let row = host.register(TemplateSpec::new("message", Vec2::new(320.0, 24.0)));
    let mut view = ScrollView::new(
        host,
        ScrollViewOptions::new(Vec2::new(320.0, 240.0)).with_default_template(row),
    );
    view.init_by_payload(
        None,
        |host: &mut MemoryHost, el: ElementId, id: &u64| host.set_content(el, format!("#{id}")),
        None,
    )
    .expect("fresh view");

    let messages: Vec<u64> = (1000..1100).collect();
    view.refresh_view_by_payload(messages.clone())
        .expect("layout must succeed");
    view.scroll_to_index(50).expect("index in range");

    let anchor = capture_first_visible_anchor(&view, |i| messages[i])
        .expect("visible range must not be empty");
    println!(
        "before prepend: y={:.1} anchor={anchor:?}",
        view.viewport_rect().y
    );

    // Prepend 10 items; old items shift by +10 indexes.
    let messages: Vec<u64> = (2000..2010).chain(1000..1100).collect();
    let index_of: HashMap<u64, usize> = messages
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();
    view.refresh_view_by_payload(messages)
        .expect("layout must succeed");

    let ok = apply_anchor(&mut view, &anchor, |key| index_of.get(key).copied())
        .expect("anchor index in range");
    println!(
        "after prepend: ok={ok} y={:.1} first_visible={:?}",
        view.viewport_rect().y,
        view.visible_indices().first()
    );
}
