//! The interactive starfield background.
//!
//! Stars drift, twinkle, and shy away from the pointer; nearby stars get
//! linked by faint connection lines. The field lives in screen coordinates
//! and is recreated on resize.

use crate::view::theme::Theme;
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

#[derive(Debug, Clone)]
pub struct StarfieldConfig {
    pub star_count: usize,
    /// Base drift speed in cells per second
    pub star_speed: f32,
    /// Pointer influence radius in cells
    pub pointer_influence: f32,
    /// Link stars closer than this many cells
    pub connection_distance: f32,
    pub max_connections_per_star: usize,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 120,
            star_speed: 1.2,
            pointer_influence: 12.0,
            connection_distance: 9.0,
            max_connections_per_star: 3,
        }
    }
}

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    radius: f32,
    base_radius: f32,
    color: usize,
    twinkle: f32,
    twinkle_speed: f32,
    brightness: f32,
}

#[derive(Debug)]
pub struct Starfield {
    config: StarfieldConfig,
    stars: Vec<Star>,
    width: f32,
    height: f32,
    pointer: Option<(f32, f32)>,
    paused: bool,
    visible: bool,
}

impl Starfield {
    pub fn new(config: StarfieldConfig, width: u16, height: u16, rng: &mut StdRng) -> Self {
        let mut field = Self {
            config,
            stars: Vec::new(),
            width: width as f32,
            height: height as f32,
            pointer: None,
            paused: false,
            visible: false,
        };
        field.seed(rng);
        field
    }

    /// Narrow viewports get a reduced star budget.
    fn effective_count(&self) -> usize {
        if self.width < 100.0 {
            self.config.star_count / 2
        } else {
            self.config.star_count
        }
    }

    fn seed(&mut self, rng: &mut StdRng) {
        let count = self.effective_count();
        self.stars = (0..count)
            .map(|_| {
                let radius = rng.gen_range(0.5..2.0);
                Star {
                    x: rng.gen_range(0.0..self.width.max(1.0)),
                    y: rng.gen_range(0.0..self.height.max(1.0)),
                    vx: rng.gen_range(-0.5..0.5) * self.config.star_speed,
                    vy: rng.gen_range(-0.5..0.5) * self.config.star_speed,
                    radius,
                    base_radius: radius,
                    color: rng.gen_range(0..4),
                    twinkle: rng.gen_range(0.0..1.0),
                    twinkle_speed: rng.gen_range(0.6..1.5),
                    brightness: rng.gen_range(0.3..1.0),
                }
            })
            .collect();
    }

    /// Destroy and recreate the field for the new viewport.
    pub fn resize(&mut self, width: u16, height: u16, rng: &mut StdRng) {
        self.width = width as f32;
        self.height = height as f32;
        self.seed(rng);
    }

    pub fn set_pointer(&mut self, pointer: Option<(f32, f32)>) {
        self.pointer = pointer;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let damping = 0.99_f32.powf(dt * 60.0);
        let max_vel = self.config.star_speed * 2.0;

        for star in &mut self.stars {
            star.x += star.vx * dt;
            star.y += star.vy * dt;

            // Wrap around screen edges
            if star.x < 0.0 {
                star.x = self.width;
            }
            if star.x > self.width {
                star.x = 0.0;
            }
            if star.y < 0.0 {
                star.y = self.height;
            }
            if star.y > self.height {
                star.y = 0.0;
            }

            star.twinkle += star.twinkle_speed * dt;
            if star.twinkle > 1.0 {
                star.twinkle -= 1.0;
            }

            match self.pointer {
                Some((px, py)) => {
                    let dx = px - star.x;
                    let dy = py - star.y;
                    let distance = (dx * dx + dy * dy).sqrt();
                    if distance < self.config.pointer_influence {
                        let force =
                            (self.config.pointer_influence - distance) / self.config.pointer_influence;
                        let angle = dy.atan2(dx);
                        // Gentle repulsion away from the pointer
                        star.vx -= angle.cos() * force * 0.6 * dt * self.config.star_speed * 10.0;
                        star.vy -= angle.sin() * force * 0.6 * dt * self.config.star_speed * 10.0;
                        star.radius = star.base_radius * (1.0 + force * 0.5);
                        star.brightness = (star.brightness + force * 18.0 * dt).min(1.0);
                    } else {
                        star.radius = star.base_radius;
                        star.brightness = (star.brightness - 0.6 * dt).max(0.3);
                    }
                }
                None => {
                    star.radius = star.base_radius;
                    star.brightness = (star.brightness - 0.6 * dt).max(0.3);
                }
            }

            star.vx = (star.vx * damping).clamp(-max_vel, max_vel);
            star.vy = (star.vy * damping).clamp(-max_vel, max_vel);
        }
    }

    fn glyph(star: &Star) -> char {
        let twinkle_intensity = (star.twinkle * std::f32::consts::TAU).sin() * 0.3 + 0.7;
        let alpha = star.brightness * twinkle_intensity;
        if star.radius > star.base_radius {
            '✹'
        } else if alpha > 0.8 {
            '✦'
        } else if alpha > 0.5 {
            '•'
        } else {
            '·'
        }
    }

    /// Paint the field into the buffer. Content widgets render afterwards and
    /// occlude whatever they cover.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible {
            return;
        }

        self.render_connections(area, buf, theme);

        for star in &self.stars {
            let x = star.x.round() as i32;
            let y = star.y.round() as i32;
            if x < area.x as i32
                || y < area.y as i32
                || x >= (area.x + area.width) as i32
                || y >= (area.y + area.height) as i32
            {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
                cell.set_char(Self::glyph(star));
                cell.set_style(Style::default().fg(theme.star_colors[star.color % 4]));
            }
        }
    }

    fn render_connections(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let max_total = if self.width < 100.0 { 50 } else { 100 };
        let mut total = 0usize;

        for (i, a) in self.stars.iter().enumerate() {
            if total >= max_total {
                break;
            }
            let mut links = 0usize;
            for b in self.stars.iter().skip(i + 1) {
                if links >= self.config.max_connections_per_star || total >= max_total {
                    break;
                }
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < self.config.connection_distance {
                    // A cell grid can't draw a line; mark the midpoint instead
                    let mx = ((a.x + b.x) / 2.0).round() as i32;
                    let my = ((a.y + b.y) / 2.0).round() as i32;
                    if mx >= area.x as i32
                        && my >= area.y as i32
                        && mx < (area.x + area.width) as i32
                        && my < (area.y + area.height) as i32
                    {
                        if let Some(cell) = buf.cell_mut((mx as u16, my as u16)) {
                            if cell.symbol() == " " {
                                cell.set_char('·');
                                cell.set_style(Style::default().fg(theme.accent_dark));
                            }
                        }
                    }
                    links += 1;
                    total += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field(width: u16) -> Starfield {
        let mut rng = StdRng::seed_from_u64(1);
        Starfield::new(StarfieldConfig::default(), width, 40, &mut rng)
    }

    #[test]
    fn test_narrow_viewports_halve_the_star_budget() {
        assert_eq!(field(160).star_count(), 120);
        assert_eq!(field(60).star_count(), 60);
    }

    #[test]
    fn test_update_keeps_stars_in_bounds() {
        let mut f = field(160);
        for _ in 0..600 {
            f.update(0.016);
        }
        for star in &f.stars {
            assert!(star.x >= 0.0 && star.x <= f.width);
            assert!(star.y >= 0.0 && star.y <= f.height);
        }
    }

    #[test]
    fn test_velocity_stays_clamped() {
        let mut f = field(160);
        f.set_pointer(Some((80.0, 20.0)));
        for _ in 0..600 {
            f.update(0.016);
        }
        let max = f.config.star_speed * 2.0;
        for star in &f.stars {
            assert!(star.vx.abs() <= max + 1e-3);
            assert!(star.vy.abs() <= max + 1e-3);
        }
    }

    #[test]
    fn test_pointer_boosts_nearby_star() {
        let mut f = field(160);
        f.stars[0].x = 80.0;
        f.stars[0].y = 20.0;
        f.stars[0].brightness = 0.3;
        f.set_pointer(Some((81.0, 20.0)));
        f.update(0.016);
        assert!(f.stars[0].radius > f.stars[0].base_radius);
        assert!(f.stars[0].brightness > 0.3);
    }

    #[test]
    fn test_pause_freezes_positions() {
        let mut f = field(160);
        let before: Vec<(f32, f32)> = f.stars.iter().map(|s| (s.x, s.y)).collect();
        f.pause();
        f.update(1.0);
        let after: Vec<(f32, f32)> = f.stars.iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(before, after);
        f.resume();
        f.update(1.0);
        let moved: Vec<(f32, f32)> = f.stars.iter().map(|s| (s.x, s.y)).collect();
        assert_ne!(before, moved);
    }

    #[test]
    fn test_resize_reseeds_the_field() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut f = Starfield::new(StarfieldConfig::default(), 160, 40, &mut rng);
        f.resize(60, 20, &mut rng);
        assert_eq!(f.star_count(), 60);
        assert_eq!(f.width, 60.0);
    }

    #[test]
    fn test_invisible_field_renders_nothing() {
        let f = field(160);
        let area = Rect::new(0, 0, 160, 40);
        let mut buf = Buffer::empty(area);
        f.render(area, &mut buf, &Theme::default());
        assert!(buf.content.iter().all(|c| c.symbol() == " "));
    }
}
