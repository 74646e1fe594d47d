/// RGBA color tuple (red, green, blue, alpha) with values in 0.0..=1.0.
pub type Rgba = (f32, f32, f32, f32);

/// Configuration for Rerun drawing of a shadow scene.
pub struct DrawConfig {
    // Labels
    pub session_name: String,
    pub entity_prefix: String,

    // Buildings
    pub building_color: Rgba,
    pub edge_color: Rgba,
    pub edge_radius: f32,

    // Ground and shadows
    pub shadow_color: Rgba,
    pub shadow_edge_color: Rgba,
    pub ground_color: Rgba,

    // Sun
    pub sun_color: Rgba,
    pub sun_radius: f32,
    pub ray_color: Rgba,
    pub ray_radius: f32,

    // Shadow length labels
    pub label_color: Rgba,
    pub label_radius: f32,
}

impl DrawConfig {
    pub fn new() -> Self {
        Self {
            session_name: "shadowcast".to_string(),
            entity_prefix: "Shadowcast".to_string(),

            building_color: (0.0, 0.0, 1.0, 0.7),
            edge_color: (0.0, 0.0, 0.0, 1.0),
            edge_radius: 0.02,

            shadow_color: (0.5, 0.5, 0.5, 0.4),
            shadow_edge_color: (0.0, 0.0, 0.0, 0.6),
            ground_color: (0.83, 0.83, 0.83, 0.2),

            sun_color: (1.0, 1.0, 0.0, 1.0),
            sun_radius: 1.0,
            ray_color: (1.0, 0.65, 0.0, 0.8),
            ray_radius: 0.01,

            label_color: (1.0, 0.0, 0.0, 1.0),
            label_radius: 0.05,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DrawConfig::new();
        assert_eq!(config.session_name, "shadowcast");
        assert_eq!(config.entity_prefix, "Shadowcast");
        assert_eq!(config.shadow_color, (0.5, 0.5, 0.5, 0.4));
        assert_eq!(config.sun_color, (1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_custom_values() {
        let config = DrawConfig {
            entity_prefix: "City".to_string(),
            ray_radius: 0.1,
            ..Default::default()
        };
        assert_eq!(config.entity_prefix, "City");
        assert_eq!(config.ray_radius, 0.1);
        assert_eq!(config.session_name, "shadowcast");
    }
}
