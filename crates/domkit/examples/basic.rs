//! Example: Basic usage of domkit

use std::rc::Rc;

use domkit::dom::{DOMRect, Document, Event, EventHandler};
use domkit::timers::EventLoop;
use domkit::{Config, debounce, offset_of, throttle, unwrap, wrap};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::default();
    let touch = config.apply();
    println!("domkit v{} (touch device: {})", domkit::VERSION, touch);

    let mut doc = config.document("app://demo");
    let body = doc.body();

    // Structure
    let card = doc.append_element(body, "article")?;
    let frame = doc.create_element("div");
    wrap(&mut doc, card, frame)?;
    println!("wrapped: body children {:?}", doc.tree().child_ids(body));
    unwrap(&mut doc, frame)?;
    println!("unwrapped: body children {:?}", doc.tree().child_ids(body));

    // Geometry
    doc.set_layout(card, DOMRect::from_xywh(24.0, 640.0, 320.0, 200.0))?;
    doc.scroll_to(0.0, 500.0);
    println!("card offset: {:?}", offset_of(&doc, card));

    // Outside-click dismissal
    doc.set_attribute(card, "class", &format!("card {}", config.hide_class))?;
    config.hide_on_click_outside(&mut doc, card);
    doc.click(body);
    println!("card class after outside click: {:?}", doc.get_attribute(card, "class"));

    // Timing
    let event_loop = EventLoop::new();
    let clock = event_loop.clone();
    let save = debounce(&event_loop, 300, move |text: String| {
        println!("t={:>4}ms save {:?}", clock.now(), text);
    });
    let clock = event_loop.clone();
    let scroll = throttle(&event_loop, 100, move |y: u32| {
        println!("t={:>4}ms scroll {}", clock.now(), y);
    });

    let on_keyup: EventHandler = {
        let save = save.clone();
        Rc::new(move |_: &mut Document, event: &mut Event| save.call(event.event_type.clone()))
    };
    doc.add_event_listener(card, "keyup", on_keyup);

    for y in (0..500).step_by(50) {
        scroll.call(y);
        doc.dispatch_event(card, Event::new("keyup", true, false));
        event_loop.advance(25);
    }
    event_loop.run_until_idle();

    Ok(())
}
