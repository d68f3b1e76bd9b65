//! Leptos component hosting an orb.
//!
//! The component renders a sized container and, once it is mounted, asks the
//! engine for an orb inside it. With a `name` the orb is registered under
//! that key (and the container gets it as its id); without one it is a
//! detached orb. Either way the orb stops by itself once the container is
//! removed from the page.

use leptos::prelude::*;
use web_sys::Element;

use super::engine::engine;

#[component]
pub fn OrbCanvas(
	/// Fallback size in px when the container has no layout of its own.
	#[prop(default = 140.0)]
	size: f64,
	/// Registry key; also used as the container id.
	#[prop(optional, into)]
	name: Option<String>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let id = name.clone();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		match &name {
			Some(key) => {
				engine().create_named(key, size);
			}
			None => {
				let container: Element = container.into();
				engine().create_in_element(&container, size);
			}
		}
	});

	view! {
		<div
			node_ref=container_ref
			id=id
			class="orb-canvas"
			style=format!("width: {}px; height: {}px;", size, size)
		/>
	}
}
