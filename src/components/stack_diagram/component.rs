use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::state::DiagramState;
use super::types::DiagramConfig;

/// Canvas component rendering one static stack diagram.
///
/// Layout runs once on mount and again on every window resize; the data never
/// changes, so those are the only triggers. The resize listener is removed on
/// component cleanup.
#[component]
pub fn StackDiagramCanvas(
	config: DiagramConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = Rc::new(config);
	let state: Rc<RefCell<Option<DiagramState>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, resize_cb_init) = (state.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = measure(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let mut diagram = DiagramState::new((*config).clone(), w, h);
		diagram.layout();
		render::render(&diagram, &ctx);
		debug!("diagram mounted at {w}x{h}");
		*state_init.borrow_mut() = Some(diagram);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = measure(&win, &canvas_resize, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
				render::render(s, &ctx);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	// on_cleanup requires Send + Sync; wasm is single-threaded, so SendWrapper
	// is sound and the cleanup closure still runs on the same thread.
	let resize_cb_cleanup = send_wrapper::SendWrapper::new(resize_cb.clone());
	on_cleanup(move || {
		if let Some(cb) = resize_cb_cleanup.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="stack-diagram-canvas"
			style="display: block;"
		/>
	}
}

/// Current drawing-surface size: the window when fullscreen, otherwise the
/// explicit props or the parent element's box. A parent with no box yet
/// measures as zero, which lays out degenerately and corrects on resize.
fn measure(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		(
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		)
	} else {
		(
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(1200.0)
			}),
		)
	}
}
