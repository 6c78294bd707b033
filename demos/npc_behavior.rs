//! GOAP NPC Behavior Demo
//!
//! Demonstrates how to drive an intelligent, goal-driven NPC with ATHENA:
//! - typed world state under compact keys
//! - actions with preconditions, costs, and repeatability
//! - sensor-driven goal priorities
//! - planning, executing one step, and replanning

use athena::{Action, Agent, Actions, Condition, Effect, Goal, Goals, Planner};

// World-state keys for the survivor NPC.
const HEALTH: u16 = 0;
const HAS_FOOD: u16 = 1;
const AT_CAMP: u16 = 2;
const AREA_SCOUTED: u16 = 3;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== ATHENA GOAP NPC Behavior Demo ===\n");

    let goals = Goals::new()
        .with(
            "recover",
            Goal::new(|sensors| {
                // Urgency scales off the sensed threat, not the simulated world.
                match sensors.get::<i64>("entity.health") {
                    Some(health) if *health < 50 => 2.0,
                    _ => 0.2,
                }
            })
            .with_condition(Condition::gt_eq(HEALTH, 100i64)),
        )
        .with(
            "establish_camp",
            Goal::fixed(1.0).with_condition(Condition::eq(AT_CAMP, true)),
        );

    let actions = Actions::new()
        .with(
            Action::new("scout_area")
                .with_cost(1.0)
                .with_effect(Effect::set(AREA_SCOUTED, true)),
        )
        .with(
            Action::new("forage")
                .with_cost(2.0)
                .with_precondition(Condition::eq(AREA_SCOUTED, true))
                .with_effect(Effect::set(HAS_FOOD, true)),
        )
        .with(
            Action::new("eat")
                .with_cost(1.0)
                .with_precondition(Condition::eq(HAS_FOOD, true))
                .with_effect(Effect::add(HEALTH, 40i64))
                .with_effect(Effect::set(HAS_FOOD, false)),
        )
        .with(
            Action::new("pitch_tent")
                .with_cost(3.0)
                .with_repeatable(false)
                .with_precondition(Condition::eq(AREA_SCOUTED, true))
                .with_effect(Effect::set(AT_CAMP, true)),
        );

    let mut agent = Agent::new(goals, actions);
    agent.set_state(HEALTH, 30i64);
    agent.set_state(HAS_FOOD, false);
    agent.set_state(AT_CAMP, false);
    agent.set_state(AREA_SCOUTED, false);
    agent.set_sensor("entity.health", 30i64);

    let mut planner = Planner::new();

    println!("--- Wounded: recovery outranks camp-building ---");
    let plan = planner.plan(&agent, 10);
    print_plan(&plan);
    println!(
        "    ({} nodes expanded in {:?})\n",
        planner.stats().nodes_expanded,
        planner.stats().duration
    );

    // The NPC heals up; the sensor now reports a healthy entity and the
    // camp goal takes over.
    agent.set_state(HEALTH, 110i64);
    agent.set_sensor("entity.health", 110i64);

    println!("--- Healthy: back to establishing camp ---");
    let plan = planner.plan(&agent, 10);
    print_plan(&plan);
}

fn print_plan(plan: &athena::Plan) {
    if plan.is_empty() {
        println!("  no plan for goal {:?}", plan.goal_name());
        return;
    }
    println!(
        "  goal {:?}, total cost {:.1}",
        plan.goal_name(),
        plan.total_cost()
    );
    for (i, step) in plan.steps().iter().enumerate().skip(1) {
        println!("  step {i}: {step}");
    }
}
