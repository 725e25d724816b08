//! Quota derivation.
//!
//! Splits the slots of a week evenly across the team, capped by each
//! member's availability.
//!
//! # Algorithm
//!
//! 1. `base = ⌊slots / team⌋`.
//! 2. Each member's cap is their working days (days minus vacation),
//!    plus one for the Sunday worker, who holds two first-day slots.
//!    The quota is `min(base, cap)`; whatever the cap cuts off goes to
//!    a pool, together with the division remainder.
//! 3. The Sunday worker takes the first pooled slot if below cap.
//! 4. The Sunday worker is raised to its two fixed first-day slots
//!    (fewer only if its cap is lower), first from the pool and then
//!    by taking one slot at a time from a random member with the
//!    largest quota.
//! 5. The rest of the pool goes one slot at a time to a random member
//!    still below cap, avoiding the previous pick where possible.
//!
//! When availability allows it, the quotas sum to the slot count, so a
//! complete roster can meet every quota exactly.
//!
//! # Complexity
//! O(team × pool).

use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::models::{Quotas, ScheduleConfig, TeamMember};
use crate::scheduler::PREASSIGNED_SHIFTS;

/// Slots a member can hold at most: one per working day, plus the
/// second first-day slot for the Sunday worker.
pub fn availability_cap(config: &ScheduleConfig, member: &TeamMember) -> u32 {
    let days = member.available_days(config.days.len()) as u32;
    if member.id == config.sunday_worker {
        days + 1
    } else {
        days
    }
}

/// Derives per-member quotas for a configuration.
///
/// Returns an empty mapping for an empty team.
pub fn compute_quotas(config: &ScheduleConfig, rng: &mut dyn RngCore) -> Quotas {
    let mut quotas = Quotas::new();
    if config.team.is_empty() {
        return quotas;
    }

    let total = config.slot_count() as u32;
    let team = config.team.len() as u32;
    let base = total / team;
    let mut pool = total - base * team;

    for member in &config.team {
        let cap = availability_cap(config, member);
        let quota = base.min(cap);
        pool += base - quota;
        quotas.set(member.id.clone(), quota);
    }

    let below_cap =
        |quotas: &Quotas, m: &TeamMember| quotas.get(&m.id) < availability_cap(config, m);

    if let Some(worker) = config.member(&config.sunday_worker) {
        if pool > 0 && below_cap(&quotas, worker) {
            quotas.bump(&worker.id);
            pool -= 1;
        }

        let fixed = PREASSIGNED_SHIFTS.len() as u32;
        let floor = fixed.min(availability_cap(config, worker));
        while quotas.get(&worker.id) < floor {
            if pool > 0 {
                pool -= 1;
            } else if !take_from_largest(config, &mut quotas, &worker.id, rng) {
                break;
            }
            quotas.bump(&worker.id);
        }
    }

    let mut last: Option<&str> = None;
    while pool > 0 {
        let open: Vec<&str> = config
            .team
            .iter()
            .filter(|m| below_cap(&quotas, *m))
            .map(|m| m.id.as_str())
            .collect();
        if open.is_empty() {
            tracing::warn!(unplaced = pool, "team availability cannot absorb every slot");
            break;
        }

        let others: Vec<&str> = open.iter().copied().filter(|m| Some(*m) != last).collect();
        let candidates = if others.is_empty() { &open } else { &others };
        let Some(&pick) = candidates.choose(rng) else {
            break;
        };
        quotas.bump(pick);
        last = Some(pick);
        pool -= 1;
    }

    quotas
}

/// Removes one slot from a random member (other than `keep`) holding the
/// largest quota. Returns `false` if nobody has a slot to give.
fn take_from_largest(
    config: &ScheduleConfig,
    quotas: &mut Quotas,
    keep: &str,
    rng: &mut dyn RngCore,
) -> bool {
    let donors: Vec<&str> = config.member_ids().filter(|m| *m != keep).collect();
    let largest = donors.iter().map(|m| quotas.get(m)).max().unwrap_or(0);
    if largest == 0 {
        return false;
    }

    let tied: Vec<&str> = donors
        .into_iter()
        .filter(|m| quotas.get(m) == largest)
        .collect();
    let Some(&donor) = tied.choose(rng) else {
        return false;
    };
    quotas.set(donor, largest - 1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WEEK_DAYS;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Team of the shipped demo: Alexandru is away Monday to Saturday.
    fn demo_config() -> ScheduleConfig {
        let mut alexandru = TeamMember::new("Alexandru");
        for day in &WEEK_DAYS[1..] {
            alexandru = alexandru.with_vacation(*day);
        }
        ScheduleConfig::weekly()
            .with_member(TeamMember::new("Vladimir"))
            .with_member(TeamMember::new("Daniel"))
            .with_member(TeamMember::new("Dan"))
            .with_member(TeamMember::new("Cristin"))
            .with_member(alexandru)
            .with_sunday_worker("Alexandru")
    }

    #[test]
    fn test_even_split() {
        let cfg = ScheduleConfig::weekly()
            .with_member(TeamMember::new("Ana"))
            .with_member(TeamMember::new("Bob"))
            .with_member(TeamMember::new("Cid"))
            .with_sunday_worker("Ana");
        let mut rng = SmallRng::seed_from_u64(42);
        let q = compute_quotas(&cfg, &mut rng);
        assert_eq!(q.get("Ana"), 7);
        assert_eq!(q.get("Bob"), 7);
        assert_eq!(q.get("Cid"), 7);
    }

    #[test]
    fn test_remainder_goes_to_sunday_worker_first() {
        // 21 slots over 4 members: base 5, remainder 1.
        let cfg = ScheduleConfig::weekly()
            .with_member(TeamMember::new("Ana"))
            .with_member(TeamMember::new("Bob"))
            .with_member(TeamMember::new("Cid"))
            .with_member(TeamMember::new("Dee"))
            .with_sunday_worker("Cid");
        let mut rng = SmallRng::seed_from_u64(42);
        let q = compute_quotas(&cfg, &mut rng);
        assert_eq!(q.get("Cid"), 6);
        assert_eq!(q.get("Ana"), 5);
        assert_eq!(q.total(), 21);
    }

    #[test]
    fn test_vacation_overflow_is_redistributed() {
        for seed in 0..10 {
            let cfg = demo_config();
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = compute_quotas(&cfg, &mut rng);

            assert_eq!(q.get("Alexandru"), 2);
            assert_eq!(q.total(), 21);
            for m in ["Vladimir", "Daniel", "Dan", "Cristin"] {
                let quota = q.get(m);
                assert!((4..=6).contains(&quota), "{m} got {quota}");
            }
        }
    }

    #[test]
    fn test_quota_never_exceeds_cap() {
        let cfg = ScheduleConfig::new()
            .with_days(["Sunday", "Monday"])
            .with_member(TeamMember::new("Ana"))
            .with_member(TeamMember::new("Bob").with_vacation("Monday"))
            .with_sunday_worker("Ana");
        let mut rng = SmallRng::seed_from_u64(1);
        let q = compute_quotas(&cfg, &mut rng);
        // Ana can hold 3 (two on Sunday, one on Monday); Bob 1.
        assert_eq!(q.get("Ana"), 3);
        assert_eq!(q.get("Bob"), 1);
        assert!(q.total() < cfg.slot_count() as u32);
    }

    #[test]
    fn test_sunday_worker_gets_both_fixed_slots_without_pool() {
        // Three slots over three members: base 1, nothing pooled.
        for seed in 0..10 {
            let cfg = ScheduleConfig::new()
                .with_days(["Sunday"])
                .with_member(TeamMember::new("Ana"))
                .with_member(TeamMember::new("Bob"))
                .with_member(TeamMember::new("Cid"))
                .with_sunday_worker("Ana");
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = compute_quotas(&cfg, &mut rng);

            assert_eq!(q.get("Ana"), 2);
            assert_eq!(q.total(), 3);
            assert_eq!(q.get("Bob") + q.get("Cid"), 1);
        }
    }

    #[test]
    fn test_one_slot_each_week_team() {
        // 21 members over 21 slots: one donor drops to zero.
        let mut cfg = ScheduleConfig::weekly();
        for i in 0..21 {
            cfg = cfg.with_member(TeamMember::new(format!("M{i:02}")));
        }
        let cfg = cfg.with_sunday_worker("M07");
        let mut rng = SmallRng::seed_from_u64(42);
        let q = compute_quotas(&cfg, &mut rng);

        assert_eq!(q.get("M07"), 2);
        assert_eq!(q.total(), 21);
        let idle = cfg.member_ids().filter(|m| q.get(m) == 0).count();
        assert_eq!(idle, 1);
        assert!(cfg.member_ids().all(|m| q.get(m) <= 2));
    }

    #[test]
    fn test_empty_team() {
        let cfg = ScheduleConfig::weekly();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(compute_quotas(&cfg, &mut rng).is_empty());
    }

    #[test]
    fn test_availability_cap() {
        let cfg = demo_config();
        assert_eq!(availability_cap(&cfg, cfg.member("Alexandru").unwrap()), 2);
        assert_eq!(availability_cap(&cfg, cfg.member("Dan").unwrap()), 7);
    }
}
