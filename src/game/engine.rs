//! The caller-facing engine.
//!
//! `RushEngine` wires the catalog, tuning tables, config and a profile
//! store together and exposes the game operations: registration, attacks,
//! box openings, upgrades and key grants.
//!
//! Every operation that writes runs inside `ProfileStore::update` for the
//! player it writes, so a failure anywhere in the closure leaves that
//! player untouched. A rush writes the attacker first and then, in a
//! separate update, the human defender's defense stars.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use super::report::{CardUpgrade, HqUpgrade, RushReport, RushRequest};
use crate::battle::{BattleOutcome, BattleResolver, Capacities, DefenderLevels, Loadout};
use crate::cards::{CardCatalog, OwnedCards};
use crate::core::{EngineConfig, EngineError, EngineResult, GameRng, PlayerId};
use crate::economy::{gold_reward, xp_reward, PlayerLedger};
use crate::loot::{battle_box_kind, BoxResult, LootEngine};
use crate::matchmaking::Matchmaker;
use crate::store::{InMemoryProfileStore, PlayerProfile, ProfileStore};
use crate::tuning::{BoxKind, TuningTables};

/// Stars a defender can concede in one battle.
const MAX_STARS: u8 = 3;

/// Battle and economy engine over a profile store.
pub struct RushEngine<S: ProfileStore = InMemoryProfileStore> {
    catalog: Arc<CardCatalog>,
    tuning: Arc<TuningTables>,
    config: EngineConfig,
    store: S,
    resolver: BattleResolver,
    loot: LootEngine,
    matchmaker: Matchmaker,
    rng: Mutex<GameRng>,
}

impl RushEngine<InMemoryProfileStore> {
    /// Engine backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(catalog: Arc<CardCatalog>, tuning: Arc<TuningTables>, config: EngineConfig) -> Self {
        Self::new(catalog, tuning, config, InMemoryProfileStore::new())
    }
}

impl<S: ProfileStore> RushEngine<S> {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, tuning: Arc<TuningTables>, config: EngineConfig, store: S) -> Self {
        Self {
            resolver: BattleResolver::new(Arc::clone(&catalog)),
            loot: LootEngine::new(Arc::clone(&catalog), Arc::clone(&tuning)),
            matchmaker: Matchmaker::new(config.matchmaking_window),
            rng: Mutex::new(GameRng::new(config.seed)),
            catalog,
            tuning,
            config,
            store,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &TuningTables {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of a player's profile.
    pub fn profile(&self, id: PlayerId) -> EngineResult<PlayerProfile> {
        self.store.get(id)
    }

    /// Independent RNG stream for one operation.
    fn fork_rng(&self) -> GameRng {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).fork()
    }

    // === Registration ===

    /// Create a profile for a new player from the starter profile.
    pub fn register_player(&self, id: PlayerId) -> EngineResult<PlayerProfile> {
        if self.store.contains(id) {
            return Err(EngineError::PlayerExists(id));
        }

        let starter = &self.config.starter;
        let ledger = PlayerLedger::new(starter);
        let mut cards = OwnedCards::new();
        cards.unlock_for_hq(&self.catalog, ledger.hq_level);

        let capacities: Capacities = self.tuning.chopper(ledger.chopper_level)?.into();
        let mut attack = Loadout::new();
        let mut defense = Loadout::new();
        for (loadout, picks) in [(&mut attack, &starter.attack), (&mut defense, &starter.defense)] {
            for (name, count) in picks {
                cards.level_of(name)?;
                let def = self.catalog.lookup(name)?;
                loadout.try_add(&self.catalog, def, *count, &capacities)?;
            }
        }

        let profile = PlayerProfile {
            id,
            ledger,
            cards,
            attack,
            defense,
        };
        self.store.insert(profile.clone())?;
        log::info!("registered {} with {} cards", id, profile.cards.len());
        Ok(profile)
    }

    // === Battles ===

    /// Find a human opponent for `id` within the star window.
    pub fn matchmake(&self, id: PlayerId) -> EngineResult<Option<PlayerId>> {
        let stars = self.store.get(id)?.ledger.total_stars();
        let mut rng = self.fork_rng();
        Ok(self.matchmaker.find_opponent(id, stars, self.store.candidates(), &mut rng))
    }

    /// Attack another base.
    ///
    /// Without an explicit opponent, players past the training threshold
    /// are matchmade; everyone else (and anyone left unmatched) attacks a
    /// scripted computer defense.
    pub fn rush(&self, request: RushRequest) -> EngineResult<RushReport> {
        let attacker_id = request.attacker;
        if request.opponent == Some(attacker_id) {
            return Err(EngineError::SelfAttack);
        }

        let attacker = self.store.get(attacker_id)?;
        let opponent = match request.opponent {
            Some(id) => Some(id),
            None if attacker.ledger.total_stars() > self.config.training_stars => self.matchmake(attacker_id)?,
            None => None,
        };
        let defender = opponent.map(|id| self.store.get(id)).transpose()?;

        let mut rng = self.fork_rng();
        let report = self.store.update(attacker_id, |profile| {
            self.attack(profile, defender.as_ref(), request.deadline, &mut rng)
        })?;

        let stars = report.outcome.stars;
        if let Some(defender_id) = opponent.filter(|_| stars < MAX_STARS) {
            let conceded = MAX_STARS - stars;
            let recorded = self.store.update(defender_id, |profile| {
                profile.ledger.record_defense(conceded, &self.config);
                Ok(())
            });
            if let Err(err) = recorded {
                log::warn!("could not record defense stars for {}: {}", defender_id, err);
            }
        }

        log::info!(
            "{} rushed {}: {} stars, {} gold, {} xp",
            attacker_id,
            opponent.map_or_else(|| "the computer".to_string(), |id| id.to_string()),
            stars,
            report.outcome.gold_reward,
            report.outcome.xp_reward
        );
        Ok(report)
    }

    /// The attacker's side of a rush, run on a draft of their profile.
    fn attack(
        &self,
        profile: &mut PlayerProfile,
        defender: Option<&PlayerProfile>,
        deadline: Option<Instant>,
        rng: &mut GameRng,
    ) -> EngineResult<RushReport> {
        let capacities = profile.capacities(&self.tuning)?;
        profile.attack.validate(&self.catalog, &capacities)?;

        let cost = profile.ledger.attack_cost(&self.tuning)?;
        profile.ledger.ensure_gold(cost)?;

        let scripted;
        let (defense, levels) = match defender {
            Some(defender) => (&defender.defense, DefenderLevels::Stored(&defender.cards)),
            None => {
                let script = self.tuning.computer_defense(profile.ledger.hq_level)?;
                scripted = Loadout::from_pairs(script.cards.iter().cloned());
                (&scripted, DefenderLevels::Randomized)
            }
        };
        let battle = self.resolver.resolve(&profile.attack, &profile.cards, defense, levels, rng)?;

        let lifetime = profile.ledger.total_stars();
        let stars = self.config.onboarding_stars(lifetime).unwrap_or(battle.stars);
        let (league_index, _) = self.tuning.league(lifetime)?;

        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(EngineError::DeadlineExceeded);
        }

        let ledger = &mut profile.ledger;
        ledger.charge(cost)?;
        let gold = gold_reward(stars, cost, rng);
        ledger.gold += gold;
        let xp = xp_reward(stars, league_index);
        let level_up = ledger.add_experience(xp, &self.tuning);

        let box_result = if ledger.record_attack(stars, &self.config) {
            let kind = battle_box_kind(ledger.boxes_opened, rng);
            log::info!("{} unlocked a {:?} battle box", profile.id, kind);
            Some(self.loot.open_box(kind, &mut profile.ledger, &mut profile.cards, rng)?)
        } else {
            None
        };

        Ok(RushReport {
            opponent: defender.map(|d| d.id),
            score: battle.score,
            outcome: BattleOutcome {
                stars,
                victory: stars > 0,
                gold_reward: gold,
                xp_reward: xp,
            },
            attack_cost: cost,
            level_up,
            box_result,
        })
    }

    // === Boxes ===

    /// Open the periodic free box.
    pub fn open_free_box(&self, id: PlayerId) -> EngineResult<BoxResult> {
        let mut rng = self.fork_rng();
        self.store.update(id, |profile| {
            self.loot
                .open_box(BoxKind::Free, &mut profile.ledger, &mut profile.cards, &mut rng)
        })
    }

    /// Spend banked defense stars on a defense box.
    pub fn open_defense_box(&self, id: PlayerId) -> EngineResult<BoxResult> {
        let mut rng = self.fork_rng();
        self.store.update(id, |profile| {
            profile.ledger.take_defense_box(&self.config)?;
            self.loot
                .open_box(BoxKind::Defense, &mut profile.ledger, &mut profile.cards, &mut rng)
        })
    }

    // === Upgrades ===

    /// Level up a card using banked copies and gold.
    pub fn upgrade_card(&self, id: PlayerId, name: &str) -> EngineResult<CardUpgrade> {
        let def = self.catalog.lookup(name)?;
        self.store.update(id, |profile| {
            let current = profile.cards.level_of(name)?;
            let step = self
                .tuning
                .upgrade(def.rarity, current)
                .ok_or_else(|| EngineError::MaxLevel(name.to_string()))?;

            let card = profile
                .cards
                .get_mut(name)
                .ok_or_else(|| EngineError::CardNotOwned(name.to_string()))?;
            if card.banked < step.copies {
                return Err(EngineError::InsufficientCopies {
                    card: name.to_string(),
                    required: step.copies,
                    banked: card.banked,
                });
            }
            profile.ledger.ensure_gold(step.gold)?;

            card.banked -= step.copies;
            card.level += 1;
            let level = card.level;
            profile.ledger.charge(step.gold)?;
            let level_up = profile.ledger.add_experience(step.xp, &self.tuning);

            log::info!("{} upgraded {} to level {}", id, name, level);
            Ok(CardUpgrade {
                card: name.to_string(),
                level,
                gold_spent: step.gold,
                xp_gained: step.xp,
                level_up,
            })
        })
    }

    /// Build the next HQ level and unlock its cards.
    pub fn upgrade_hq(&self, id: PlayerId) -> EngineResult<HqUpgrade> {
        self.store.update(id, |profile| {
            let ledger = &mut profile.ledger;
            let next = ledger.hq_level + 1;
            if !self.tuning.has_hq(next) {
                return Err(EngineError::MaxLevel("HQ".to_string()));
            }
            let max = self.tuning.max_hq(ledger.level)?;
            if next > max {
                return Err(EngineError::HqLocked { requested: next, max });
            }

            let cost = self.tuning.hq(ledger.hq_level)?.upgrade_cost;
            ledger.charge(cost)?;
            ledger.hq_level = next;
            let unlocked = profile.cards.unlock_for_hq(&self.catalog, next);

            log::info!("{} built HQ {} unlocking {:?}", id, next, unlocked);
            Ok(HqUpgrade {
                level: next,
                gold_spent: cost,
                unlocked,
            })
        })
    }

    /// Upgrade the chopper, raising housing capacities. Capped by HQ level.
    pub fn upgrade_chopper(&self, id: PlayerId) -> EngineResult<u32> {
        self.store.update(id, |profile| {
            let ledger = &mut profile.ledger;
            let next = ledger.chopper_level + 1;
            if next > ledger.hq_level {
                return Err(EngineError::HqLocked {
                    requested: next,
                    max: ledger.hq_level,
                });
            }
            if !self.tuning.has_chopper(next) {
                return Err(EngineError::MaxLevel("chopper".to_string()));
            }

            let cost = self.tuning.chopper(ledger.chopper_level)?.upgrade_cost;
            ledger.charge(cost)?;
            ledger.chopper_level = next;
            log::info!("{} upgraded chopper to {}", id, next);
            Ok(next)
        })
    }

    // === Keys ===

    /// Give a player keys, up to the configured maximum. Returns the new count.
    pub fn grant_keys(&self, id: PlayerId, keys: u32) -> EngineResult<u32> {
        self.store.update(id, |profile| {
            profile.ledger.grant_keys(keys, &self.config)?;
            Ok(profile.ledger.keys)
        })
    }
}
