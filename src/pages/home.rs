use leptos::prelude::*;
use log::error;

use crate::components::stack_diagram::{StackDiagramCanvas, config};

/// Legend mapping line styles to integration kinds.
#[component]
fn Legend() -> impl IntoView {
	view! {
		<div style="display: flex; justify-content: center; flex-wrap: wrap; gap: 1.5rem; margin-bottom: 2rem;">
			<div style="display: flex; align-items: center; gap: 0.5rem;">
				<div style="width: 2rem; height: 4px; background: #3b82f6; border-radius: 2px;"></div>
				<span style="font-size: 0.875rem; font-weight: 500;">"Direct API Integration"</span>
			</div>
			<div style="display: flex; align-items: center; gap: 0.5rem;">
				<div style="width: 2rem; height: 0; border-top: 3px dashed #6b7280;"></div>
				<span style="font-size: 0.875rem; font-weight: 500;">"Loosely Coupled (Zapier/Manual)"</span>
			</div>
		</div>
	}
}

/// Default Home Page: the tech-stack architecture diagram.
#[component]
pub fn Home() -> impl IntoView {
	let loaded = config::builtin_stack();
	if let Err(e) = &loaded {
		error!("failed to load diagram configuration: {e}");
	}

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			{loaded
				.map(|diagram| {
					let (title, subtitle) = (diagram.title.clone(), diagram.subtitle.clone());
					view! {
						<div style="background: #111827; color: #d1d5db; min-height: 100vh; padding: 2rem; font-family: 'Inter', sans-serif;">
							<div style="max-width: 80rem; margin: 0 auto;">
								<header style="text-align: center; margin-bottom: 2rem;">
									<h1 style="font-size: 2.25rem; font-weight: 700; color: #ffffff;">{title}</h1>
									<p style="margin-top: 0.5rem; font-size: 1.125rem; color: #9ca3af;">{subtitle}</p>
								</header>

								<Legend />

								<div style="position: relative; min-height: 1200px; width: 100%;">
									<StackDiagramCanvas config=diagram />
								</div>
							</div>
						</div>
					}
				})}

		</ErrorBoundary>
	}
}
