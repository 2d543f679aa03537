//! Unit tests for pfsi-human.

use pfsi_core::{HumanId, HumanRng, PatchId, Time};
use pfsi_patch::{ForceOfInfection, MovementMatrix, PatchLayer, PatchParams, SparseMatrix};

use crate::{
    BitingDistribution, EventCategory, Human, HumanError, HumanEvent, HumanParams, Intent,
    PfsiModel, PfsiParams, PfsiState, PopulationBuilder, VaccineKind,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pfsi() -> PfsiParams {
    PfsiParams {
        mosquito_to_human:       1.0,
        human_to_mosquito:       1.0,
        latent_period:           10.0,
        mean_infection_duration: 200.0,
        fever_probability:       0.0,
        mean_time_to_fever:      1.0,
        treatment_probability:   0.0,
        mean_time_to_treatment:  1.0,
        prophylaxis_duration:    20.0,
        pe_block:                1.0,
        pe_mean_duration:        100.0,
        pe_sd_duration:          0.0,
        tb_block:                1.0,
        tb_mean_duration:        100.0,
        tb_sd_duration:          0.0,
    }
}

fn model() -> PfsiModel {
    PfsiModel::new(pfsi()).unwrap()
}

fn human(state: PfsiState) -> Human {
    Human::from_params(HumanParams::stay_at_home(HumanId(0), PatchId(0), 2, state))
}

fn two_patch_layer() -> PatchLayer {
    let movement = MovementMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    PatchLayer::new(vec![PatchParams::human_only(); 2], movement, SparseMatrix::identity(2)).unwrap()
}

fn all_infectious(bites_per_weight: f64) -> ForceOfInfection {
    ForceOfInfection::Local { bites_per_weight, infectious_fraction: 1.0, susceptible_fraction: 0.0 }
}

fn all_susceptible(bites_per_weight: f64) -> ForceOfInfection {
    ForceOfInfection::Local { bites_per_weight, infectious_fraction: 0.0, susceptible_fraction: 1.0 }
}

fn scheduled(intents: &[Intent], event: HumanEvent) -> Option<Time> {
    intents.iter().find_map(|i| match i {
        Intent::Schedule { at, event: e, .. } if *e == event => Some(*at),
        _ => None,
    })
}

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn rejects_probability_above_one() {
        let mut p = pfsi();
        p.mosquito_to_human = 1.5;
        assert!(matches!(PfsiModel::new(p), Err(HumanError::Params(_))));
    }

    #[test]
    fn rejects_zero_infection_duration() {
        let mut p = pfsi();
        p.mean_infection_duration = 0.0;
        assert!(PfsiModel::new(p).is_err());
    }

    #[test]
    fn biting_codes() {
        assert_eq!(BitingDistribution::from_code(0, 1.0).unwrap(), BitingDistribution::Poisson);
        assert_eq!(
            BitingDistribution::from_code(1, 2.5).unwrap(),
            BitingDistribution::NegativeBinomial { size: 2.5 }
        );
        assert!(matches!(
            BitingDistribution::from_code(7, 1.0),
            Err(HumanError::UnknownBitingDistribution(7))
        ));
    }

    #[test]
    fn vaccine_tags_parse() {
        assert_eq!("pe".parse::<VaccineKind>().unwrap(), VaccineKind::PreErythrocytic);
        assert_eq!(" TB ".parse::<VaccineKind>().unwrap(), VaccineKind::TransmissionBlocking);
        assert!("rts".parse::<VaccineKind>().is_err());
    }
}

#[cfg(test)]
mod builder {
    use super::*;

    fn residents(n: u32, n_patches: usize) -> Vec<HumanParams> {
        (0..n)
            .map(|i| HumanParams::stay_at_home(HumanId(i), PatchId(0), n_patches, PfsiState::Susceptible))
            .collect()
    }

    #[test]
    fn builds_arena_and_rngs() {
        let (pop, rngs) = PopulationBuilder::new(residents(5, 2), 2, 1).build().unwrap();
        assert_eq!(pop.len(), 5);
        assert_eq!(rngs.len(), 5);
        assert!(pop.iter().all(|h| h.is_home()));
        assert_eq!(pop.weight_by_location(2), vec![5.0, 0.0]);
    }

    #[test]
    fn rejects_out_of_order_ids() {
        let mut p = residents(3, 2);
        p.swap(0, 2);
        assert!(matches!(
            PopulationBuilder::new(p, 2, 1).build(),
            Err(HumanError::InvalidHuman { .. })
        ));
    }

    #[test]
    fn rejects_home_out_of_range() {
        let mut p = residents(2, 2);
        p[1].home = PatchId(5);
        assert!(PopulationBuilder::new(p, 2, 1).build().is_err());
    }

    #[test]
    fn rejects_short_trip_vector() {
        let mut p = residents(2, 3);
        p[0].trip_duration.pop();
        assert!(PopulationBuilder::new(p, 3, 1).build().is_err());
    }

    #[test]
    fn rejects_negative_weight() {
        let mut p = residents(2, 2);
        p[0].bite_weight = -1.0;
        assert!(PopulationBuilder::new(p, 2, 1).build().is_err());
    }
}

#[cfg(test)]
mod epochs {
    use super::*;

    #[test]
    fn rearming_invalidates_previous_event() {
        let mut h = human(PfsiState::Susceptible);
        let first = h.arm(EventCategory::Trip);
        let second = h.arm(EventCategory::Trip);
        assert!(!h.is_live(HumanEvent::Depart, first));
        assert!(h.is_live(HumanEvent::Return, second));
    }

    #[test]
    fn categories_are_independent() {
        let mut h = human(PfsiState::Susceptible);
        let bite = h.arm(EventCategory::Bite);
        h.disarm(EventCategory::Clearance);
        assert!(h.is_live(HumanEvent::Bite, bite));
    }
}

#[cfg(test)]
mod transitions {
    use super::*;

    #[test]
    fn initial_infected_gets_clearance_timer() {
        let m = model();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(1, h.id);
        let out = m.initial_events(&mut h, &mut rng).unwrap();
        assert_eq!(scheduled(&out, HumanEvent::Bite), Some(Time::ZERO));
        assert!(scheduled(&out, HumanEvent::Clearance).is_some());
        // Stay-at-home humans never schedule a trip.
        assert!(scheduled(&out, HumanEvent::Depart).is_none());
    }

    #[test]
    fn initial_prophylactic_gets_end_timer() {
        let m = model();
        let mut h = human(PfsiState::Prophylactic);
        let mut rng = HumanRng::new(1, h.id);
        let out = m.initial_events(&mut h, &mut rng).unwrap();
        assert_eq!(scheduled(&out, HumanEvent::EndProphylaxis), Some(Time(20.0)));
    }

    #[test]
    fn bite_outside_on_bite_is_an_error() {
        let m = model();
        let mut h = human(PfsiState::Susceptible);
        let mut rng = HumanRng::new(1, h.id);
        let err = m.on_event(&mut h, HumanEvent::Bite, Time(2.0), &two_patch_layer(), &mut rng).unwrap_err();
        assert!(matches!(err, HumanError::Misrouted(HumanEvent::Bite)));
    }

    #[test]
    fn infectious_bite_starts_latent_infection() {
        let m = model();
        let mut h = human(PfsiState::Susceptible);
        let mut rng = HumanRng::new(3, h.id);
        let out = m.on_bite(&mut h, all_infectious(50.0), Time(4.0), &mut rng).unwrap();

        assert_eq!(h.state, PfsiState::Susceptible);
        assert_eq!(h.pending_onset, Some(PatchId(0)));
        assert_eq!(scheduled(&out, HumanEvent::InfectionOnset), Some(Time(14.0)));
        assert_eq!(scheduled(&out, HumanEvent::Bite), Some(Time(5.0)));
    }

    #[test]
    fn onset_at_home_counts_resident_incidence() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = human(PfsiState::Susceptible);
        h.pending_onset = Some(PatchId(0));
        let mut rng = HumanRng::new(3, h.id);
        let out = m.on_event(&mut h, HumanEvent::InfectionOnset, Time(14.0), &layer, &mut rng).unwrap();

        assert_eq!(h.state, PfsiState::Infected);
        assert!(out.contains(&Intent::Incidence { home: PatchId(0), traveller: false }));
        assert!(scheduled(&out, HumanEvent::Clearance).is_some());
    }

    #[test]
    fn onset_acquired_away_counts_traveller_incidence() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = human(PfsiState::Susceptible);
        h.pending_onset = Some(PatchId(1));
        let mut rng = HumanRng::new(3, h.id);
        let out = m.on_event(&mut h, HumanEvent::InfectionOnset, Time(1.0), &layer, &mut rng).unwrap();
        assert!(out.contains(&Intent::Incidence { home: PatchId(0), traveller: true }));
    }

    #[test]
    fn clearance_returns_to_susceptible() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(3, h.id);
        m.on_event(&mut h, HumanEvent::Clearance, Time(1.0), &layer, &mut rng).unwrap();
        assert_eq!(h.state, PfsiState::Susceptible);
    }

    #[test]
    fn fever_leads_to_treatment_and_prophylaxis() {
        let mut p = pfsi();
        p.fever_probability = 1.0;
        p.treatment_probability = 1.0;
        let m = PfsiModel::new(p).unwrap();
        let layer = two_patch_layer();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(9, h.id);

        let out = m.on_event(&mut h, HumanEvent::Fever, Time(2.0), &layer, &mut rng).unwrap();
        assert!(scheduled(&out, HumanEvent::Treatment).is_some());

        let out = m.on_event(&mut h, HumanEvent::Treatment, Time(3.0), &layer, &mut rng).unwrap();
        assert_eq!(h.state, PfsiState::Prophylactic);
        assert!(out.contains(&Intent::Treated));
        assert_eq!(scheduled(&out, HumanEvent::EndProphylaxis), Some(Time(23.0)));

        m.on_event(&mut h, HumanEvent::EndProphylaxis, Time(23.0), &layer, &mut rng).unwrap();
        assert_eq!(h.state, PfsiState::Susceptible);
    }

    #[test]
    fn prophylactic_human_cannot_be_inoculated() {
        let m = model();
        let mut h = human(PfsiState::Prophylactic);
        let mut rng = HumanRng::new(3, h.id);
        let out = m.on_bite(&mut h, all_infectious(10.0), Time(0.0), &mut rng).unwrap();
        assert!(h.pending_onset.is_none());
        assert!(scheduled(&out, HumanEvent::InfectionOnset).is_none());
    }

    #[test]
    fn zero_bite_weight_never_infected() {
        let m = model();
        let mut h = human(PfsiState::Susceptible);
        h.bite_weight = 0.0;
        let mut rng = HumanRng::new(11, h.id);
        for day in 0..1_000 {
            let out = m.on_bite(&mut h, all_infectious(50.0), Time(day as f64), &mut rng).unwrap();
            assert!(scheduled(&out, HumanEvent::InfectionOnset).is_none());
        }
        m.on_bite(&mut h, ForceOfInfection::Reservoir { eir: 100.0 }, Time(0.0), &mut rng).unwrap();
        assert_eq!(h.state, PfsiState::Susceptible);
        assert!(h.pending_onset.is_none());
    }

    #[test]
    fn infected_human_infects_susceptible_mosquitoes() {
        let m = model();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(5, h.id);
        let out = m.on_bite(&mut h, all_susceptible(20.0), Time(0.0), &mut rng).unwrap();
        let feeds: f64 = out
            .iter()
            .filter_map(|i| match i {
                Intent::InfectMosquitoes { patch, feeds } if *patch == PatchId(0) => Some(*feeds),
                _ => None,
            })
            .sum();
        assert!(feeds > 0.0);
    }

    #[test]
    fn reservoir_bites_never_infect_mosquitoes() {
        let m = model();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(5, h.id);
        let out = m.on_bite(&mut h, ForceOfInfection::Reservoir { eir: 20.0 }, Time(0.0), &mut rng).unwrap();
        assert!(!out.iter().any(|i| matches!(i, Intent::InfectMosquitoes { .. })));
    }
}

#[cfg(test)]
mod travel {
    use super::*;

    fn traveller() -> Human {
        let mut p = HumanParams::stay_at_home(HumanId(0), PatchId(0), 2, PfsiState::Susceptible);
        p.trip_frequency = 0.5;
        p.trip_duration = vec![0.0, 3.0];
        Human::from_params(p)
    }

    #[test]
    fn depart_then_return() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = traveller();
        let mut rng = HumanRng::new(2, h.id);

        let out = m.on_event(&mut h, HumanEvent::Depart, Time(1.0), &layer, &mut rng).unwrap();
        assert!(out.contains(&Intent::TravelTo { destination: PatchId(1) }));
        let back = scheduled(&out, HumanEvent::Return).unwrap();
        assert!(back > Time(1.0));

        let out = m.on_event(&mut h, HumanEvent::Return, back, &layer, &mut rng).unwrap();
        assert!(out.contains(&Intent::TravelTo { destination: PatchId(0) }));
        assert!(scheduled(&out, HumanEvent::Depart).unwrap() > back);
    }

    #[test]
    fn zero_duration_destination_is_skipped() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = traveller();
        h.trip_duration = vec![0.0, 0.0];
        let mut rng = HumanRng::new(2, h.id);
        let out = m.on_event(&mut h, HumanEvent::Depart, Time(1.0), &layer, &mut rng).unwrap();
        assert!(!out.iter().any(|i| matches!(i, Intent::TravelTo { .. })));
        assert!(scheduled(&out, HumanEvent::Depart).is_some());
    }
}

#[cfg(test)]
mod vaccination {
    use super::*;

    #[test]
    fn treat_moves_infected_to_prophylactic() {
        let m = model();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(4, h.id);
        let out = m
            .on_vaccination(&mut h, VaccineKind::PreErythrocytic, true, Time(500.0), &mut rng)
            .unwrap();
        assert_eq!(h.state, PfsiState::Prophylactic);
        assert!(h.vaccine.pre_erythrocytic);
        assert_eq!(scheduled(&out, HumanEvent::PeWane), Some(Time(600.0)));
        assert_eq!(scheduled(&out, HumanEvent::EndProphylaxis), Some(Time(520.0)));
    }

    #[test]
    fn treat_leaves_susceptible_and_clears_latent_infection() {
        let m = model();
        let mut h = human(PfsiState::Susceptible);
        h.pending_onset = Some(PatchId(0));
        let mut rng = HumanRng::new(4, h.id);
        m.on_vaccination(&mut h, VaccineKind::TransmissionBlocking, true, Time(1.0), &mut rng)
            .unwrap();
        assert_eq!(h.state, PfsiState::Susceptible);
        assert!(h.pending_onset.is_none());
        assert!(h.vaccine.transmission_blocking);
    }

    #[test]
    fn pe_vaccine_blocks_inoculation_until_it_wanes() {
        let m = model();
        let layer = two_patch_layer();
        let mut h = human(PfsiState::Susceptible);
        let mut rng = HumanRng::new(4, h.id);
        m.on_vaccination(&mut h, VaccineKind::PreErythrocytic, false, Time(0.0), &mut rng).unwrap();

        m.on_bite(&mut h, all_infectious(10.0), Time(1.0), &mut rng).unwrap();
        assert!(h.pending_onset.is_none());

        m.on_event(&mut h, HumanEvent::PeWane, Time(100.0), &layer, &mut rng).unwrap();
        m.on_bite(&mut h, all_infectious(10.0), Time(101.0), &mut rng).unwrap();
        assert!(h.pending_onset.is_some());
    }

    #[test]
    fn tb_vaccine_blocks_mosquito_infection() {
        let m = model();
        let mut h = human(PfsiState::Infected);
        let mut rng = HumanRng::new(4, h.id);
        m.on_vaccination(&mut h, VaccineKind::TransmissionBlocking, false, Time(0.0), &mut rng).unwrap();
        let out = m.on_bite(&mut h, all_susceptible(20.0), Time(0.0), &mut rng).unwrap();
        assert!(!out.iter().any(|i| matches!(i, Intent::InfectMosquitoes { .. })));
    }
}
