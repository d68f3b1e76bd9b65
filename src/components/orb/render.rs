//! Canvas rendering for the orb.
//!
//! One pass per frame, painted in this order:
//! 1. Clear, then a dark drop shadow behind the sphere
//! 2. A coloured glow following the palette
//! 3. Droplets, back to front (there is no depth buffer)

use std::f64::consts::PI;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::state::{Modulation, OrbState};
use super::theme::{Color, OrbStyle};

/// Renders one frame. Particles are updated and projected as part of the pass.
pub fn render(
	state: &mut OrbState,
	ctx: &CanvasRenderingContext2d,
	style: &OrbStyle,
	modulation: &Modulation,
) {
	ctx.clear_rect(0.0, 0.0, state.size, state.size);

	draw_shadow(state, ctx, style);
	draw_glow(state, ctx, style, modulation);
	draw_droplets(state, ctx, style, modulation);
}

#[allow(deprecated)]
fn fill_with(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient) {
	ctx.set_fill_style(gradient);
}

fn draw_shadow(state: &OrbState, ctx: &CanvasRenderingContext2d, style: &OrbStyle) {
	let shadow = &style.shadow;
	let (cx, cy) = state.center();
	let (sx, sy) = (cx + shadow.offset.0, cy + shadow.offset.1);

	let Ok(gradient) = ctx.create_radial_gradient(
		sx,
		sy,
		state.radius * shadow.inner,
		sx,
		sy,
		state.radius * shadow.outer,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, &shadow.color.with_alpha(shadow.alpha).to_css());
	let _ = gradient.add_color_stop(
		shadow.mid_stop as f32,
		&shadow.color.with_alpha(shadow.mid_alpha).to_css(),
	);
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

	fill_with(ctx, &gradient);
	ctx.fill_rect(0.0, 0.0, state.size, state.size);
}

fn draw_glow(
	state: &OrbState,
	ctx: &CanvasRenderingContext2d,
	style: &OrbStyle,
	modulation: &Modulation,
) {
	let glow = &style.glow;
	let (cx, cy) = state.center();
	let color = style.palette.sample(state.time, 0.0, modulation.tint);
	let alpha = if modulation.listening {
		glow.listening_alpha
	} else {
		glow.idle_alpha
	};

	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.radius * glow.inner,
		cx,
		cy,
		state.radius * glow.outer,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, &color.with_alpha(alpha).to_css());
	let _ = gradient.add_color_stop(0.5, &color.with_alpha(alpha * glow.mid_falloff).to_css());
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

	fill_with(ctx, &gradient);
	ctx.fill_rect(0.0, 0.0, state.size, state.size);
}

fn draw_droplets(
	state: &mut OrbState,
	ctx: &CanvasRenderingContext2d,
	style: &OrbStyle,
	modulation: &Modulation,
) {
	let droplet = &style.droplet;
	let highlight = Color::rgb(255, 255, 255);

	for pp in state.project(modulation) {
		let particle = &state.particles[pp.index];
		let color = style
			.palette
			.sample(state.time, particle.color_offset, modulation.tint);
		let size = state.dot_size(&pp, modulation.listening);
		let alpha = state.dot_alpha(&pp, modulation.listening);
		if size <= 0.0 || alpha <= 0.0 {
			continue;
		}

		let shift = size * droplet.highlight_shift;
		let Ok(gradient) =
			ctx.create_radial_gradient(pp.x - shift, pp.y - shift, 0.0, pp.x, pp.y, size)
		else {
			continue;
		};

		let _ = gradient.add_color_stop(
			0.0,
			&highlight.with_alpha(alpha * droplet.highlight_alpha).to_css(),
		);
		let _ = gradient.add_color_stop(droplet.body_stop as f32, &color.with_alpha(alpha).to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(alpha * droplet.rim_alpha).to_css());

		ctx.begin_path();
		let _ = ctx.arc(pp.x, pp.y, size, 0.0, PI * 2.0);
		fill_with(ctx, &gradient);
		ctx.fill();
	}
}
