//! Motion domain: ground, headroom, and climb-region sensing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::body::BodyState;
use crate::motion::components::{ContactState, GameLayer, Player};
use crate::motion::config::MotionConfig;

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    config: Res<MotionConfig>,
    mut query: Query<(&Transform, &BodyState, &mut ContactState), With<Player>>,
) {
    // Only ground-layer geometry counts; climb sensors never do.
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, body, mut contact) in &mut query {
        contact.was_grounded = contact.grounded;

        // Short ray down from the bottom of the current collider
        let feet = transform.translation.truncate()
            + Vec2::new(0.0, body.collider_offset.y - body.collider_size.y * 0.5);

        let hit = spatial_query.cast_ray(
            feet,
            Dir2::NEG_Y,
            config.ground_check_distance,
            true,
            &ground_filter,
        );

        contact.grounded = hit.is_some();

        if contact.grounded && !contact.was_grounded {
            debug!("Landed");
        } else if !contact.grounded && contact.was_grounded {
            debug!("Left ground");
        }
    }
}

/// Checks whether the standing collider would fit above the current one.
/// Gates crouch-to-stand transitions.
pub(crate) fn detect_headroom(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &BodyState, &mut ContactState), With<Player>>,
) {
    let solid_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, body, mut contact) in &mut query {
        let clearance = body.normal_size.y - body.collider_size.y;
        if clearance <= 0.0 {
            // Already at full height
            contact.headroom = true;
            continue;
        }

        let head = transform.translation.truncate()
            + Vec2::new(0.0, body.collider_offset.y + body.collider_size.y * 0.5);

        let hit = spatial_query.cast_ray(head, Dir2::Y, clearance + 2.0, true, &solid_filter);

        contact.headroom = hit.is_none();
    }
}

pub(crate) fn detect_climb_regions(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &mut ContactState), With<Player>>,
) {
    let climb_filter = SpatialQueryFilter::from_mask(GameLayer::Climb);

    for (transform, collider, mut contact) in &mut query {
        let hits = spatial_query.shape_intersections(
            collider,
            transform.translation.truncate(),
            0.0,
            &climb_filter,
        );

        contact.in_climb_zone = !hits.is_empty();
    }
}
