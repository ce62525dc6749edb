//! Pairwise AABB contact resolution
//!
//! Every unordered pair of dynamic entries is tested for bounds overlap. An
//! overlapping pair is nudged apart by a fixed bias and, unless already
//! separating, exchanges a restitution impulse along the line between the
//! two box centers. That normal is only an approximation of the true contact
//! normal; boxes overlapping mostly sideways can be pushed vertically.

use nova_math::Vec3;

use crate::events::ContactEvent;
use crate::material::CombineRule;
use crate::pipeline::StepContext;
use crate::registry::DynamicEntry;

/// Below this length the center offset has no usable direction
const NORMAL_EPSILON: f32 = 1e-6;

pub fn resolve_contacts(ctx: &mut StepContext<'_>) {
    let dynamic = ctx.dynamic;

    for (i, a) in dynamic.iter().enumerate() {
        match ctx.stores.bodies.get(a.body) {
            Some(body) if body.is_static => continue,
            Some(_) => {}
            None => continue,
        }

        for b in &dynamic[i + 1..] {
            resolve_pair(ctx, a, b);
        }
    }
}

fn resolve_pair(ctx: &mut StepContext<'_>, a: &DynamicEntry, b: &DynamicEntry) {
    let bias = ctx.config.contact_bias;
    let stores = &mut *ctx.stores;

    let (Some(collider_a), Some(collider_b)) = (
        stores.colliders.get(a.collider).copied(),
        stores.colliders.get(b.collider).copied(),
    ) else {
        return;
    };
    // Entries sharing a component cannot be resolved against each other
    let Some((transform_a, transform_b)) = stores.transforms.get2_mut(a.transform, b.transform) else {
        return;
    };
    let Some((body_a, body_b)) = stores.bodies.get2_mut(a.body, b.body) else {
        return;
    };

    let bounds_a = collider_a.world_aabb(transform_a);
    let bounds_b = collider_b.world_aabb(transform_b);
    if !bounds_a.intersects(&bounds_b) {
        return;
    }

    let normal = (bounds_a.center() - bounds_b.center())
        .try_normalize(NORMAL_EPSILON)
        .unwrap_or(Vec3::Y);

    if !body_a.is_static {
        transform_a.position += normal * bias;
    }
    if !body_b.is_static {
        transform_b.position -= normal * bias;
    }

    let restitution = body_a.material.combine_restitution(&body_b.material, CombineRule::Average);
    let velocity_along_normal = (body_a.velocity - body_b.velocity).dot(normal);

    let mut impulse = 0.0;
    let inverse_mass_sum = body_a.inverse_mass() + body_b.inverse_mass();
    if velocity_along_normal <= 0.0 && inverse_mass_sum > 0.0 {
        impulse = -(1.0 + restitution) * velocity_along_normal / inverse_mass_sum;
        let impulse_vec = normal * impulse;
        if !body_a.is_static {
            body_a.velocity += impulse_vec * body_a.inverse_mass();
        }
        if !body_b.is_static {
            body_b.velocity -= impulse_vec * body_b.inverse_mass();
        }
    }

    log::trace!("Contact {} / {}: impulse {}", a.entity, b.entity, impulse);
    ctx.events.push(ContactEvent {
        entity_a: a.entity,
        entity_b: b.entity,
        normal,
        impulse,
        is_trigger: collider_a.is_trigger || collider_b.is_trigger,
    });
}
