use crate::collision::Contact;
use crate::core::{EventQueue, MarbleEvent, SimulationConfig};
use crate::gravity::GravityState;
use crate::marble::{ControlFrame, ControlInput, MarbleBody};
use crate::math::{Quaternion, Vector3};

/// Resolves the active contact and integrates the marble over one substep
///
/// A per-substep pure function of (state, contact, input): velocities are
/// worked on in the contact surface's reference frame, passed through the
/// velocity-cancel and contact-force phases in a fixed order, and the pose
/// integrated at the end. Degenerate inputs fall back to no-rotation /
/// no-friction rather than propagating NaN.
#[derive(Debug, Clone)]
pub struct ContactResolver {
    config: SimulationConfig,
}

impl ContactResolver {
    /// Creates a resolver with the given configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver's configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advances the marble by one substep
    ///
    /// `dt` is the (possibly sweep-clamped) slice duration. Jump and bounce
    /// events are pushed onto `events` as they occur.
    pub fn resolve(
        &self,
        body: &mut MarbleBody,
        contact: Option<&Contact>,
        input: &ControlInput,
        frame: &ControlFrame,
        gravity: &GravityState,
        dt: f32,
        events: &mut EventQueue,
    ) {
        let surface_velocity = contact.map_or(Vector3::ZERO, |c| c.surface_velocity);
        let (side_dir, motion_dir) = frame.axes_on_plane(gravity.up());

        // Work in the surface's reference frame
        let mut velocity = body.linear_velocity - surface_velocity;
        let mut omega = body.angular_velocity;

        let move_torque = self.compute_move_torque(body, omega, input, side_dir, motion_dir, gravity);
        let is_moving = move_torque.is_some();
        let (control_torque, target_omega) =
            move_torque.unwrap_or((Vector3::ZERO, Vector3::ZERO));

        // First pass: cancel velocity with bounce enabled
        self.velocity_cancel(body, contact, gravity, &mut velocity, &mut omega, false, events);

        let mut lin_accel =
            self.external_forces(body, contact.is_none(), input, side_dir, motion_dir, gravity);

        let ang_accel = self.apply_contact_forces(
            body,
            contact,
            gravity,
            dt,
            !is_moving,
            input.jump,
            control_torque,
            target_omega,
            &mut velocity,
            &mut omega,
            &mut lin_accel,
            events,
        );

        // Integrate forces
        velocity += lin_accel * dt;
        omega += ang_accel * dt;

        // Second pass: resting-contact cleanup only, bounce disabled
        self.velocity_cancel(body, contact, gravity, &mut velocity, &mut omega, true, events);

        // Back to the world frame
        velocity += surface_velocity;

        body.linear_velocity = velocity;
        body.angular_velocity = omega;

        self.integrate_pose(body, dt);
    }

    /// Derives the input torque and the angular velocity it aims for
    ///
    /// Returns None when no input is held. The roll-speed clamp compares the
    /// velocity at the top of the sphere against the requested speed on each
    /// camera axis, so input can never spin the marble past its limit.
    fn compute_move_torque(
        &self,
        body: &MarbleBody,
        omega: Vector3,
        input: &ControlInput,
        side_dir: Vector3,
        motion_dir: Vector3,
        gravity: &GravityState,
    ) -> Option<(Vector3, Vector3)> {
        let rel_gravity = gravity.up() * body.radius();
        if rel_gravity.length_squared() < crate::math::EPSILON {
            return None;
        }

        let top_velocity = omega.cross(&rel_gravity);
        let top_y = top_velocity.dot(&motion_dir);
        let top_x = top_velocity.dot(&side_dir);

        let mut move_y = body.params.max_roll_velocity * input.movement.y;
        let mut move_x = body.params.max_roll_velocity * input.movement.x;

        if move_y.abs() < 0.001 && move_x.abs() < 0.001 {
            return None;
        }

        // Already rolling faster than requested: track, don't fight
        if top_y > move_y && move_y > 0.0 {
            move_y = top_y;
        } else if top_y < move_y && move_y < 0.0 {
            move_y = top_y;
        }

        if top_x > move_x && move_x > 0.0 {
            move_x = top_x;
        } else if top_x < move_x && move_x < 0.0 {
            move_x = top_x;
        }

        let target_omega = rel_gravity.cross(&(motion_dir * move_y + side_dir * move_x))
            / rel_gravity.length_squared();

        let mut torque = target_omega - omega;
        let magnitude = torque.length();
        if magnitude > body.params.angular_acceleration {
            torque *= body.params.angular_acceleration / magnitude;
        }

        Some((torque, target_omega))
    }

    /// Cancels inward velocity at the contact, bouncing where warranted
    ///
    /// Resting contacts (near-horizontal, inward speed below the bounce
    /// threshold) have the inward component zeroed. Real impacts get a
    /// restitution impulse plus an angular impulse from the tangential
    /// velocity at the contact point, capped so it cannot exceed the
    /// available tangential momentum.
    fn velocity_cancel(
        &self,
        body: &MarbleBody,
        contact: Option<&Contact>,
        gravity: &GravityState,
        velocity: &mut Vector3,
        omega: &mut Vector3,
        no_bounce: bool,
        events: &mut EventQueue,
    ) {
        let Some(c) = contact else {
            return;
        };

        let up = gravity.up();
        let radius = body.radius().max(crate::math::EPSILON);
        let n = c.normal;

        let mut first_pass = true;

        for _ in 0..self.config.cancel_iterations {
            let mut any_change = false;

            let normal_rel_vel = velocity.dot(&n);

            // World-frame normal speed matters for moving-platform impacts
            let world_normal_vel = (*velocity + c.surface_velocity).dot(&n);

            let should_bounce = !no_bounce
                && (normal_rel_vel < -body.params.min_bounce_velocity
                    || world_normal_vel.abs() > self.config.hard_bounce_speed);

            if !should_bounce && n.dot(&up) > self.config.floor_dot && normal_rel_vel < 0.0 {
                // Resting ground lock: cancel the tiny downward component
                *velocity -= n * normal_rel_vel;
                any_change = true;
            } else if should_bounce && normal_rel_vel < 0.0 {
                let restitution = body.params.bounce_restitution * c.restitution;
                let bounce_impulse = -(1.0 + restitution) * normal_rel_vel;

                *velocity += n * bounce_impulse;
                any_change = true;

                events.push(MarbleEvent::Bounced {
                    speed: -normal_rel_vel,
                    surface: c.surface,
                });

                // Angular impulse from the tangential velocity at the contact
                let vel_at_contact = *velocity + omega.cross(&(-n * radius));
                let tangent_vel = vel_at_contact - n * vel_at_contact.dot(&n);
                let tangent_mag = tangent_vel.length();

                if tangent_mag > 0.001 {
                    let penetration_speed = -normal_rel_vel;

                    let mut inertia = (5.0
                        * body.params.bounce_kinetic_friction
                        * c.friction
                        * penetration_speed)
                        / (2.0 * radius);
                    inertia = inertia.min(tangent_mag / radius);

                    let tangent_dir = tangent_vel / tangent_mag;
                    let angular_impulse = (-n).cross(&-tangent_dir) * inertia;

                    *omega += angular_impulse;
                    *velocity -= (-angular_impulse).cross(&(-n * radius));
                }
            }

            if !any_change && !first_pass {
                break;
            }
            first_pass = false;
        }
    }

    /// Accumulates the always-on external forces
    ///
    /// Gravity applies every substep; air-control acceleration only while no
    /// contact exists.
    fn external_forces(
        &self,
        body: &MarbleBody,
        airborne: bool,
        input: &ControlInput,
        side_dir: Vector3,
        motion_dir: Vector3,
        gravity: &GravityState,
    ) -> Vector3 {
        let mut force = gravity.direction() * (gravity.magnitude() * body.params.gravity_scale);

        if airborne {
            force += (side_dir * input.movement.x + motion_dir * input.movement.y)
                * body.params.air_acceleration;
        }

        force
    }

    /// Applies jump, bounce-floor and friction forces at the contact
    ///
    /// Returns the angular acceleration for the substep. A jump consumes the
    /// substep's friction resolution entirely (early return).
    #[allow(clippy::too_many_arguments)]
    fn apply_contact_forces(
        &self,
        body: &MarbleBody,
        contact: Option<&Contact>,
        gravity: &GravityState,
        dt: f32,
        is_centered: bool,
        jump: bool,
        control_torque: Vector3,
        target_omega: Vector3,
        velocity: &mut Vector3,
        omega: &mut Vector3,
        lin_accel: &mut Vector3,
        events: &mut EventQueue,
    ) -> Vector3 {
        let mut ang_accel = Vector3::ZERO;
        let mut a_control = control_torque;
        let radius = body.radius().max(crate::math::EPSILON);

        // The contact only resists while something presses the marble into it
        let pressing = contact.and_then(|c| {
            let normal_force = -c.normal.dot(lin_accel);
            (normal_force > 0.0).then_some((c, normal_force))
        });

        // Jump impulse, isolated from friction
        if let Some((c, _)) = pressing {
            if jump && body.params.bounce <= 0.0 {
                let n = c.normal.normalize();
                if n.dot(&gravity.up()) > self.config.jump_dot {
                    // The platform's normal motion must not dampen the jump
                    let platform_normal_vel = c.surface_velocity.dot(&n);
                    *velocity -= n * platform_normal_vel;

                    let normal_vel = velocity.dot(&n);
                    *velocity -= n * normal_vel;

                    *velocity += n * body.params.jump_impulse;

                    events.push(MarbleEvent::Jumped { surface: c.surface });

                    return ang_accel;
                }
            }
        }

        // Super-bounce floor: enforce a minimum rebound speed
        if let Some((c, _)) = pressing {
            if body.params.bounce > 0.0 {
                let direction = c.normal.normalize();
                let directional_speed = velocity.dot(&direction);

                if directional_speed < body.params.bounce {
                    *velocity -= direction * directional_speed;
                    *velocity += direction * body.params.bounce;
                }
            }
        }

        // Friction resolution
        if let Some((c, normal_force)) = pressing {
            let contact_vel = *velocity + omega.cross(&(-c.normal * radius));

            let tangent = contact_vel.project_on_plane(&c.normal);
            let tangent_speed = tangent.length();

            if tangent_speed > 1.0e-4 {
                let dir = tangent / tangent_speed;

                let kinetic = body.params.kinetic_friction * c.friction;
                let force_mag = normal_force * kinetic;
                *lin_accel += dir * -force_mag;

                let torque_mag = (5.0 * kinetic * normal_force) / (2.0 * radius);
                ang_accel += (-c.normal).cross(&-dir) * torque_mag;
            }

            // Static friction clamp
            let grav_vec = gravity.up() * radius;
            let grav_torque = grav_vec.cross(lin_accel) / grav_vec.length_squared();

            if is_centered {
                // Re-derive the braking torque against the post-force spin
                let omega_next = *omega + ang_accel * dt;
                a_control = target_omega - omega_next;

                let magnitude = a_control.length();
                if magnitude > body.params.braking_acceleration {
                    a_control *= body.params.braking_acceleration / magnitude;
                }
            }

            let mut control_force = -a_control.cross(&(-c.normal * radius));
            let total_force = grav_torque.cross(&(-c.normal * radius)) + control_force;

            let static_limit = body.params.static_friction * c.friction * normal_force;
            let total_mag = total_force.length();

            if total_mag > static_limit && total_mag > crate::math::EPSILON {
                let kinetic = body.params.kinetic_friction * c.friction;
                control_force *= kinetic * normal_force / total_mag;
            }

            *lin_accel += control_force;
            ang_accel += grav_torque;
        }

        ang_accel + a_control
    }

    /// Integrates position and orientation
    ///
    /// Orientation advances by the exponential map of the angular velocity;
    /// a near-zero spin skips the quaternion update entirely.
    fn integrate_pose(&self, body: &mut MarbleBody, dt: f32) {
        body.position += body.linear_velocity * dt;

        let omega = body.angular_velocity;
        let speed = omega.length();
        if speed <= self.config.min_angular_speed {
            return;
        }

        let rotation = Quaternion::from_axis_angle(omega / speed, dt * speed).normalize();
        body.orientation = (rotation * body.orientation).normalize();
    }
}
