//! DOM construction and per-state rendering.
//!
//! The page skeleton is built once on mount; afterwards `render` pushes the
//! controller state into it. Image layers are only touched when their contents
//! change so entrance animations do not replay on unrelated updates.

use std::fmt::Write as _;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::config::AppConfig;
use crate::controller::{InteractionController, Point, ScatteredImage, Size};
use crate::particles::ParticleField;

const STYLES: &str = r#"
.vc-root { position:fixed; inset:0; overflow:hidden; display:flex; align-items:center; justify-content:center; font-family:'Poppins','Segoe UI',sans-serif; transition:background 0.8s ease; }
.vc-root.mood-happy { background:linear-gradient(135deg,#ffdde1 0%,#ee9ca7 100%); }
.vc-root.mood-sad { background:linear-gradient(135deg,#bdc3c7 0%,#6b7b8c 100%); }
.vc-root.mood-excited { background:linear-gradient(135deg,#ff9a9e 0%,#fad0c4 50%,#fbc2eb 100%); }
.vc-layer { position:absolute; inset:0; pointer-events:none; }
.vc-heart { position:absolute; bottom:-10%; animation-name:vc-float; animation-timing-function:linear; animation-iteration-count:infinite; }
.vc-tear { position:absolute; top:-5%; width:4px; height:18px; border-radius:50%; background:rgba(120,170,255,0.7); animation:vc-fall 2s linear infinite; }
.vc-img { position:absolute; width:150px; max-width:22vw; border-radius:14px; box-shadow:0 6px 18px rgba(0,0,0,0.25); transform-origin:center; }
.vc-decoy { animation:vc-pop 0.4s ease-out; }
.vc-cheer { opacity:0; animation:vc-pop 0.6s ease-out forwards; }
.vc-card, .vc-success { position:relative; z-index:10; background:rgba(255,255,255,0.92); border-radius:24px; padding:40px 48px; text-align:center; box-shadow:0 12px 40px rgba(0,0,0,0.18); max-width:560px; }
.vc-buttons { display:flex; gap:24px; justify-content:center; align-items:center; margin-top:28px; min-height:80px; }
.vc-btn { border:none; border-radius:999px; padding:14px 30px; font-size:18px; font-weight:600; cursor:pointer; transition:transform 0.3s ease, opacity 0.5s ease; }
.vc-yes { background:#ff4d94; color:#fff; }
.vc-no { background:#e0e0e0; color:#444; }
.vc-counter { position:absolute; top:16px; right:20px; z-index:20; padding:6px 12px; border-radius:10px; background:rgba(0,0,0,0.35); color:#fff; font-size:14px; }
.vc-message { position:absolute; top:18%; left:50%; transform:translateX(-50%); z-index:20; padding:10px 18px; border-radius:12px; background:rgba(255,255,255,0.95); color:#d6336c; font-size:20px; font-weight:600; animation:vc-pop 0.3s ease-out; }
.vc-falling { position:absolute; top:-10%; font-size:28px; animation-name:vc-rain; animation-timing-function:linear; animation-iteration-count:infinite; }
.vc-inline-cat { height:1.6em; vertical-align:middle; margin-left:6px; }
.vc-confetti { position:fixed; inset:0; width:100vw; height:100vh; pointer-events:none; z-index:50; }
@keyframes vc-float { from { transform:translateY(0); } to { transform:translateY(-120vh); } }
@keyframes vc-fall { from { transform:translateY(0); opacity:1; } to { transform:translateY(110vh); opacity:0.2; } }
@keyframes vc-rain { from { transform:translateY(0) rotate(0deg); } to { transform:translateY(120vh) rotate(360deg); } }
@keyframes vc-pop { from { opacity:0; scale:0.3; } to { opacity:1; scale:1; } }
"#;

/// Handles to every element `render` updates.
pub struct Dom {
    style: Element,
    pub root: Element,
    tears: Element,
    decoys: Element,
    celebration: Element,
    counter: Element,
    message: Element,
    card: Element,
    pub accept_btn: Element,
    pub decline_btn: Element,
    success: Element,
    success_tries: Element,
    raining: Element,
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

/// What the image layers currently show.
#[derive(Default)]
pub struct RenderCache {
    revision: Option<u64>,
    decoys: usize,
    celebration: usize,
    tears: usize,
    painted_particles: bool,
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Dom {
    /// Build the widget skeleton under `body`.
    pub fn build(
        doc: &Document,
        body: &Element,
        config: &AppConfig,
        controller: &InteractionController,
    ) -> Result<Dom, JsValue> {
        let style = doc.create_element("style")?;
        style.set_text_content(Some(STYLES));
        body.append_child(&style)?;

        let root = element(doc, "div", "vc-root mood-happy")?;
        root.set_id("vc-root");

        let hearts = element(doc, "div", "vc-layer")?;
        hearts.set_inner_html(&floating_hearts_html(controller));
        let tears = element(doc, "div", "vc-layer")?;
        let decoys = element(doc, "div", "vc-layer")?;
        let celebration = element(doc, "div", "vc-layer")?;
        let counter = element(doc, "div", "vc-counter")?;
        let message = element(doc, "div", "vc-message")?;

        let card = element(doc, "div", "vc-card")?;
        let title = doc.create_element("h1")?;
        title.set_text_content(Some(&config.question));
        let subtitle = doc.create_element("p")?;
        subtitle.set_text_content(Some(&config.subtitle));
        let buttons = element(doc, "div", "vc-buttons")?;
        let accept_btn = element(doc, "button", "vc-btn vc-yes")?;
        accept_btn.set_text_content(Some("Yes! ✓"));
        let decline_btn = element(doc, "button", "vc-btn vc-no level-0")?;
        buttons.append_child(&accept_btn)?;
        buttons.append_child(&decline_btn)?;
        card.append_child(&title)?;
        card.append_child(&subtitle)?;
        card.append_child(&buttons)?;

        let success = element(doc, "div", "vc-success")?;
        let raining = element(doc, "div", "vc-layer")?;
        let emoji = element(doc, "div", "vc-success-emoji")?;
        emoji.set_attribute("style", "font-size:64px;")?;
        emoji.set_text_content(Some("💖"));
        let heading = doc.create_element("h1")?;
        heading.set_text_content(Some("Yayyyy! You said Yesssss!"));
        let came_around = doc.create_element("p")?;
        came_around.set_text_content(Some("I knew you'd come around!"));
        if !config.success_image.is_empty() {
            let cat = element(doc, "img", "vc-inline-cat")?;
            cat.set_attribute("src", &config.success_image)?;
            cat.set_attribute("alt", "side eye cat")?;
            came_around.append_child(&cat)?;
        }
        let success_tries = doc.create_element("p")?;
        let closing = doc.create_element("p")?;
        closing.set_text_content(Some("Get ready for the best Valentine's Day ever! 💕✨"));
        for child in [&raining, &emoji, &heading, &came_around, &success_tries, &closing] {
            success.append_child(child)?;
        }

        for child in [&hearts, &tears, &decoys, &celebration, &counter, &message, &card, &success] {
            root.append_child(child)?;
        }
        body.append_child(&root)?;

        let canvas: HtmlCanvasElement = element(doc, "canvas", "vc-confetti")?.dyn_into()?;
        body.append_child(&canvas)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        Ok(Dom {
            style,
            root,
            tears,
            decoys,
            celebration,
            counter,
            message,
            card,
            accept_btn,
            decline_btn,
            success,
            success_tries,
            raining,
            canvas,
            ctx,
        })
    }

    /// Detach everything `build` added to the page.
    pub fn remove(&self) {
        self.style.remove();
        self.root.remove();
        self.canvas.remove();
    }

    /// Rendered size of the page container; `None` before layout.
    pub fn container_size(&self) -> Option<Size> {
        let rect = self.root.get_bounding_client_rect();
        (rect.width() > 0.0 && rect.height() > 0.0).then(|| Size::new(rect.width(), rect.height()))
    }

    /// Viewport centre of the decline control, if it is on screen.
    pub fn decline_center(&self) -> Option<Point> {
        let rect = self.decline_btn.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        Some(Point::new(
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        ))
    }

    /// Match the confetti canvas backing store to its CSS size.
    pub fn canvas_size(&self) -> (f64, f64) {
        let w = self.canvas.client_width().max(0) as u32;
        let h = self.canvas.client_height().max(0) as u32;
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
        (f64::from(w), f64::from(h))
    }
}

/// Push controller state into the DOM if it changed since the last call.
pub fn render(dom: &Dom, cache: &mut RenderCache, c: &InteractionController) -> Result<(), JsValue> {
    if cache.revision == Some(c.revision()) {
        return Ok(());
    }
    cache.revision = Some(c.revision());
    let accepted = c.is_accepted();

    dom.root.set_class_name(&format!("vc-root {}", c.mood().css_class()));

    if c.tears().len() != cache.tears {
        dom.tears.set_inner_html(&tears_html(c));
        cache.tears = c.tears().len();
    }

    let decoys = c.decoys();
    if decoys.len() < cache.decoys {
        dom.decoys.set_inner_html("");
        cache.decoys = 0;
    }
    if decoys.len() > cache.decoys {
        let mut html = String::new();
        for img in &decoys[cache.decoys..] {
            push_image(&mut html, img, "vc-img vc-decoy", "Sad cat", None);
        }
        dom.decoys.insert_adjacent_html("beforeend", &html)?;
        cache.decoys = decoys.len();
    }

    if c.celebration().len() != cache.celebration {
        let mut html = String::new();
        for cheer in c.celebration() {
            push_image(&mut html, &cheer.image, "vc-img vc-cheer", "Happy cat", Some(cheer.reveal_delay_ms));
        }
        dom.celebration.set_inner_html(&html);
        dom.raining.set_inner_html(&falling_hearts_html(c));
        cache.celebration = c.celebration().len();
    }

    let attempts = c.attempt_count();
    if !accepted && attempts > 0 {
        dom.counter.set_text_content(Some(&format!("Attempts: {attempts}")));
        show(&dom.counter, true)?;
    } else {
        show(&dom.counter, false)?;
    }

    match c.message() {
        Some(msg) => {
            dom.message.set_text_content(Some(&msg.text));
            show(&dom.message, true)?;
        }
        None => show(&dom.message, false)?,
    }

    show(&dom.card, !accepted)?;
    show(&dom.success, accepted)?;
    if accepted {
        if attempts > 0 {
            let noun = if attempts == 1 { "try" } else { "tries" };
            dom.success_tries
                .set_text_content(Some(&format!("It took you {attempts} {noun} to say yes! 🎉")));
        } else {
            dom.success_tries.set_text_content(None);
        }
        return Ok(());
    }

    dom.accept_btn
        .set_attribute("style", &format!("transform:scale({});", c.accept_scale()))?;

    let state = c.state();
    if state.decline_visible {
        let offset = state.decline_offset;
        dom.decline_btn.set_attribute(
            "style",
            &format!(
                "transform:translate({}px, {}px) scale({}); opacity:{};",
                offset.x,
                offset.y,
                c.decline_scale(),
                c.decline_opacity()
            ),
        )?;
        dom.decline_btn
            .set_class_name(&format!("vc-btn vc-no level-{}", state.guilt_level));
        dom.decline_btn.set_text_content(Some(&c.decline_label()));
    } else {
        dom.decline_btn.set_attribute("style", "display:none;")?;
    }
    Ok(())
}

/// Advance and paint the confetti field.
pub fn paint_particles(dom: &Dom, cache: &mut RenderCache, field: &mut ParticleField) -> Result<(), JsValue> {
    if field.is_empty() && !cache.painted_particles {
        return Ok(());
    }
    field.advance();
    let (w, h) = dom.canvas_size();
    dom.ctx.clear_rect(0.0, 0.0, w, h);
    for p in field.particles() {
        let corners = p.corners();
        dom.ctx.set_global_alpha(p.alpha());
        dom.ctx.set_fill_style_str(p.color);
        dom.ctx.begin_path();
        dom.ctx.move_to(corners[0].0, corners[0].1);
        for &(x, y) in &corners[1..] {
            dom.ctx.line_to(x, y);
        }
        dom.ctx.close_path();
        dom.ctx.fill();
    }
    dom.ctx.set_global_alpha(1.0);
    cache.painted_particles = !field.is_empty();
    Ok(())
}

fn show(el: &Element, visible: bool) -> Result<(), JsValue> {
    if visible {
        el.remove_attribute("hidden")
    } else {
        el.set_attribute("hidden", "")
    }
}

fn push_image(html: &mut String, img: &ScatteredImage, class: &str, alt: &str, delay_ms: Option<f64>) {
    let _ = write!(
        html,
        "<img class='{class}' src='{src}' alt='{alt}' style='left:{left}%;top:{top}%;transform:translate(-50%,-50%) rotate({rot}deg) scale({scale});",
        src = escape_attr(&img.source),
        left = img.position.x,
        top = img.position.y,
        rot = img.rotation_deg,
        scale = img.scale,
    );
    if let Some(delay) = delay_ms {
        let _ = write!(html, "animation-delay:{}s;", delay / 1000.0);
    }
    html.push_str("'>");
}

fn floating_hearts_html(c: &InteractionController) -> String {
    let mut html = String::new();
    for heart in c.floating_hearts() {
        let _ = write!(
            html,
            "<div class='vc-heart' style='left:{}%;animation-duration:{}s;animation-delay:{}s;font-size:{}rem;opacity:{};'>❤️</div>",
            heart.left_pct, heart.duration_s, heart.delay_s, heart.size_rem, heart.opacity
        );
    }
    html
}

fn tears_html(c: &InteractionController) -> String {
    let mut html = String::new();
    for tear in c.tears() {
        let _ = write!(
            html,
            "<div class='vc-tear' style='left:{}%;animation-delay:{}s;'></div>",
            tear.left_pct, tear.delay_s
        );
    }
    html
}

fn falling_hearts_html(c: &InteractionController) -> String {
    let mut html = String::new();
    for heart in c.falling_hearts() {
        let _ = write!(
            html,
            "<div class='vc-falling' style='left:{}%;animation-delay:{}s;animation-duration:{}s;'>❤️</div>",
            heart.left_pct, heart.delay_s, heart.duration_s
        );
    }
    html
}
