use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::controller::{StepController, StepRequest, TickAction};
use super::controls::StepControls;
use super::render;
use super::scene::{Scene, ViewTransform};
use super::ticker::{Ticker, TickerHandle};
use crate::animation::{EngineConfig, InterpolationEngine, Timeline};

#[component]
pub fn RelationsGraph(
	timeline: Timeline,
	#[prop(optional)] config: EngineConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let engine = match InterpolationEngine::new(timeline, config) {
		Ok(engine) => Rc::new(RefCell::new(engine)),
		Err(err) => {
			error!("Cannot start relations graph: {err}");
			return view! { <p class="relations-graph-error">{err.to_string()}</p> }.into_any();
		}
	};
	let labels: Vec<String> = engine
		.borrow()
		.timeline()
		.steps()
		.iter()
		.map(|step| step.label.clone())
		.collect();

	let (current, set_current) = signal(0usize);
	let (running, set_running) = signal(false);
	let (show_labels, set_show_labels) = signal(false);
	let (requested, set_requested) = signal(None::<usize>);

	let disposed = Unmounted::default();
	let disposed_cleanup = disposed.clone();
	on_cleanup(move || disposed_cleanup.set());

	let controller = Rc::new(RefCell::new(StepController::default()));
	let sync = move |controller: &StepController| {
		set_current.set(controller.pressed());
		set_running.set(controller.is_running());
	};

	let ticker: Rc<RefCell<Option<Ticker>>> = Rc::new(RefCell::new(None));
	let (engine_req, controller_req, ticker_req, disposed_req) =
		(engine.clone(), controller.clone(), ticker.clone(), disposed.clone());
	Effect::new(move |_| {
		let Some(to) = requested.get() else {
			return;
		};
		let request = controller_req
			.borrow_mut()
			.request(&mut engine_req.borrow_mut(), to);
		match request {
			StepRequest::Started => sync(&controller_req.borrow()),
			StepRequest::Ignored => return,
			StepRequest::Rejected(err) => {
				warn!("Ignoring step request: {err}");
				return;
			}
		}

		let period = engine_req.borrow().config().tick_interval();
		let (engine_tick, controller_tick, disposed_tick) =
			(engine_req.clone(), controller_req.clone(), disposed_req.clone());
		let on_tick = move |handle: &TickerHandle| {
			if disposed_tick.get() {
				handle.stop();
				return;
			}
			let action = controller_tick
				.borrow_mut()
				.tick(&mut engine_tick.borrow_mut());
			if action == TickAction::Stop {
				handle.stop();
				sync(&controller_tick.borrow());
			}
		};
		match Ticker::start(period, on_tick) {
			Ok(started) => *ticker_req.borrow_mut() = Some(started),
			Err(err) => {
				error!("Cannot schedule animation ticks: {err:?}");
				controller_req
					.borrow_mut()
					.scheduling_failed(&mut engine_req.borrow_mut());
				sync(&controller_req.borrow());
			}
		}
	});

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (engine_init, animate_init, resize_cb_init, disposed_init) =
		(engine.clone(), animate.clone(), resize_cb.clone(), disposed.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
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
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let size = Rc::new(Cell::new((w, h)));

		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				error!("Canvas has no 2d context: {err:?}");
				return;
			}
		};

		if fullscreen {
			let (size_resize, canvas_resize) = (size.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				size_resize.set((nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (engine_anim, animate_inner, resize_cb_anim, disposed_anim) = (
			engine_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			disposed_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if disposed_anim.get() {
				// unmounted: detach the resize listener and let the loop lapse
				if let (Some(window), Some(cb)) = (web_sys::window(), resize_cb_anim.take()) {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				return;
			}
			let (w, h) = size.get();
			let engine = engine_anim.borrow();
			let scene = Scene::build(&engine, labels_visible(show_labels));
			render::render(&scene, &ViewTransform::fit(w, h), w, h, &ctx);
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref())
			{
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<div class="relations-graph">
			<StepControls
				labels=labels
				current=current
				running=running
				show_labels=show_labels
				on_step=set_requested
				on_show_labels=set_show_labels
			/>
			<canvas node_ref=canvas_ref class="relations-graph-canvas" style="display: block;" />
		</div>
	}
	.into_any()
}

/// Raised by `on_cleanup`; timers and the frame loop stop once it is set.
#[derive(Clone, Debug, Default)]
struct Unmounted(Arc<AtomicBool>);

impl Unmounted {
	fn set(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	fn get(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Label toggle as seen by the frame loop, which may outlive the signal.
fn labels_visible(show_labels: ReadSignal<bool>) -> bool {
	show_labels.try_get_untracked().unwrap_or(false)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(JsValue::from)
}
