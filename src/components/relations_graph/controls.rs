use leptos::prelude::*;

/// One button per time step plus the label toggle.
///
/// Buttons stay disabled while a transition runs; clicking one writes the
/// requested step into `on_step`.
#[component]
pub fn StepControls(
	labels: Vec<String>,
	#[prop(into)] current: Signal<usize>,
	#[prop(into)] running: Signal<bool>,
	#[prop(into)] show_labels: Signal<bool>,
	on_step: WriteSignal<Option<usize>>,
	on_show_labels: WriteSignal<bool>,
) -> impl IntoView {
	let buttons = labels
		.into_iter()
		.enumerate()
		.map(|(step, label)| {
			view! {
				<button
					id=format!("step-{}", step + 1)
					class="step-button"
					class:pressed=move || current.get() == step
					disabled=move || running.get()
					on:click=move |_| on_step.set(Some(step))
				>
					{label}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="step-controls">
			{buttons}
			<label class="show-labels">
				<input
					type="checkbox"
					prop:checked=move || show_labels.get()
					on:input=move |ev| on_show_labels.set(event_target_checked(&ev))
				/>
				"Show names"
			</label>
		</div>
	}
}
