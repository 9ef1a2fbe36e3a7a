use loopscroll::{Easing, ScrollView, ScrollViewOptions, Vec2};
use loopscroll_adapter::{ElementId, MemoryHost, TemplateSpec};

fn main() {
    // Example: tick-driven smooth scroll to an index, interrupted by a drag.
    //
    // An adapter would:
    // - start the animation in response to a "scroll to index" command
    // - call tick(now_ms) from its frame loop until it returns None
    // - call on_begin_drag when the user grabs the scroll container
    let mut host = MemoryHost::new();
    let row = host.register(TemplateSpec::new("row", Vec2::new(200.0, 20.0)));
    let mut view: ScrollView<MemoryHost> = ScrollView::new(
        host,
        ScrollViewOptions::new(Vec2::new(200.0, 100.0))
            .with_default_template(row)
            .with_smooth_scroll_duration_ms(240)
            .with_easing(Easing::SmoothStep),
    );
    view.init_by_index(
        None,
        |host: &mut MemoryHost, el: ElementId, i: usize| host.set_content(el, format!("row {i}")),
        None,
    )
    .expect("fresh view");
    view.refresh_view_by_count(1_000)
        .expect("layout must succeed");

    let target = view.smooth_scroll_to_index(500, 0).expect("index in range");
    println!("target={target:?}");

    let mut now_ms = 0u64;
    while let Some(position) = view.tick(now_ms).expect("initialized") {
        println!(
            "t={now_ms} y={:.4} visible={:?}",
            position.y,
            view.visible_indices()
        );
        now_ms += 16;
    }

    view.smooth_scroll_to_index(0, now_ms).expect("index in range");
    view.tick(now_ms + 48).expect("initialized");
    view.on_begin_drag();
    println!(
        "drag: animating={} y={:.4}",
        view.is_animating(),
        view.scroll_position().y
    );
}
