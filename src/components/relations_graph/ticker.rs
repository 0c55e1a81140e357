use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;

/// Lets a tick callback stop the interval it runs on.
#[derive(Clone, Debug, Default)]
pub struct TickerHandle(Rc<Cell<Option<i32>>>);

impl TickerHandle {
	pub fn stop(&self) {
		if let Some(id) = self.0.take() {
			if let Some(window) = web_sys::window() {
				window.clear_interval_with_handle(id);
			}
		}
	}

	pub fn is_active(&self) -> bool {
		self.0.get().is_some()
	}
}

/// Repeating `setInterval` timer. The interval is cleared on drop.
pub struct Ticker {
	handle: TickerHandle,
	_callback: Closure<dyn FnMut()>,
}

impl Ticker {
	pub fn start(
		period: Duration,
		mut on_tick: impl FnMut(&TickerHandle) + 'static,
	) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let handle = TickerHandle::default();
		let inner = handle.clone();
		let callback = Closure::<dyn FnMut()>::new(move || {
			if inner.is_active() {
				on_tick(&inner);
			}
		});
		let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
		let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			millis,
		)?;
		handle.0.set(Some(id));
		Ok(Self {
			handle,
			_callback: callback,
		})
	}
}

impl Drop for Ticker {
	fn drop(&mut self) {
		self.handle.stop();
	}
}
