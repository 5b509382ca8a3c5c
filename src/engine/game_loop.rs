use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, Payout, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus, ShowdownResult};
use crate::domain::table::{PotMode, Table};
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{is_round_complete, sweep_bets};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::{blind_positions, first_active_from, next_dealer, shift_after_removal};
use crate::engine::pot::PotAward;
use crate::engine::side_pots::compute_side_pots;
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;
use crate::eval::{evaluate_best_hand, EvaluatedHand};

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStatus {
    /// Раздача не идёт: стол ждёт игроков.
    Waiting,
    Ongoing,
    Finished(HandSummary),
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished(_))
    }

    pub fn summary(&self) -> Option<&HandSummary> {
        match self {
            HandStatus::Finished(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Раздача идёт и ещё не дошла до шоудауна.
fn hand_is_live(table: &Table) -> bool {
    table.in_progress && !matches!(table.street, Street::PreGame | Street::Showdown)
}

// ---------- места ----------

/// Посадить игрока. Севший посреди раздачи ждёт следующую.
pub fn add_player(
    table: &mut Table,
    player_id: impl Into<PlayerId>,
    stack: Chips,
) -> Result<(), EngineError> {
    let player_id = player_id.into();
    if table.seat_index(&player_id).is_some() {
        return Err(EngineError::AlreadySeated(player_id));
    }
    if table.is_full() {
        return Err(EngineError::TableFull);
    }

    let mut seat = PlayerAtTable::new(player_id, stack);
    if hand_is_live(table) {
        seat.status = PlayerStatus::Out;
    }
    log::info!("table {}: {} sits down with {}", table.id, seat.player_id, stack);
    table.seats.push(seat);
    Ok(())
}

/// Убрать игрока из-за стола.
///
/// Если сейчас его ход – он сначала фолдит обычным путём действия,
/// иначе просто помечается сфолдившим. Если после ухода претендент
/// остался один, раздача сразу идёт на шоудаун.
/// Возвращает фишки к возврату (стек + несметённая ставка) и статус раздачи.
pub fn remove_player(
    table: &mut Table,
    player_id: &str,
) -> Result<(Chips, HandStatus), EngineError> {
    let idx = table
        .seat_index(player_id)
        .ok_or_else(|| EngineError::PlayerNotAtTable(player_id.to_string()))?;

    let was_live = hand_is_live(table);
    let mut status = if table.in_progress {
        HandStatus::Ongoing
    } else {
        HandStatus::Waiting
    };

    if was_live {
        if table.current_player == Some(idx) {
            status = apply_action(table, PlayerAction::fold(player_id))?;
        } else if table.seats[idx].is_contender() {
            table.seats[idx].status = PlayerStatus::Folded;
        }
    }

    let seat = table.seats.remove(idx);
    let refund = seat.refund_value();
    let remaining = table.seats.len();

    table.dealer_index = table
        .dealer_index
        .and_then(|d| shift_after_removal(d, idx, remaining));
    table.current_player = match table.current_player {
        Some(c) if c > idx => Some(c - 1),
        Some(c) if c < idx => Some(c),
        _ => None,
    };

    if table.in_progress {
        table.history.push(HandEventKind::PlayerLeft {
            player_id: seat.player_id.clone(),
            refund,
        });
    }
    log::info!("table {}: {} leaves with {}", table.id, seat.player_id, refund);

    // Шоудаун только если раздача ещё не закончилась фолдом выше.
    if was_live && hand_is_live(table) && table.contenders_count() <= 1 {
        status = HandStatus::Finished(determine_winners(table));
    }

    if remaining == 0 {
        table.dealer_index = None;
    }

    Ok((refund, status))
}

// ---------- старт раздачи ----------

/// Первая раздача за столом (или после паузы из-за нехватки игроков).
pub fn start_game<R: RandomSource>(table: &mut Table, rng: &mut R) -> Result<HandStatus, EngineError> {
    if table.seated_count() < table.options.min_players {
        return Err(EngineError::NotEnoughPlayers);
    }
    if table.in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }
    Ok(setup_new_hand(table, rng))
}

/// Следующая раздача. Можно только после шоудауна предыдущей.
pub fn start_new_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
) -> Result<HandStatus, EngineError> {
    if table.street != Street::Showdown {
        return Err(EngineError::HandNotFinished);
    }
    Ok(setup_new_hand(table, rng))
}

/// Подготовка новой раздачи: сброс мест, кнопка, блайнды, карманные карты.
fn setup_new_hand<R: RandomSource>(table: &mut Table, rng: &mut R) -> HandStatus {
    table.pot = Chips::ZERO;
    table.board.clear();
    table.contributions.clear();
    table.history.clear();
    table.last_summary = None;
    table.last_raiser = None;
    table.current_player = None;

    for p in table.seats.iter_mut() {
        p.reset_for_new_hand();
    }

    // Игроки без фишек покидают стол.
    let (keep, dropped): (Vec<_>, Vec<_>) = table
        .seats
        .drain(..)
        .partition(|p| p.status != PlayerStatus::Out);
    table.seats = keep;
    for p in &dropped {
        log::info!("table {}: {} is out of chips and leaves", table.id, p.player_id);
    }

    if table.seats.len() < table.options.min_players {
        log::info!(
            "table {}: {} players seated, waiting for {}",
            table.id,
            table.seats.len(),
            table.options.min_players
        );
        table.in_progress = false;
        table.street = Street::PreGame;
        return HandStatus::Waiting;
    }

    table.in_progress = true;
    table.deck = Deck::shuffled(rng);
    table.hand_id += 1;

    let dealer = next_dealer(table);
    table.dealer_index = Some(dealer);
    let (sb, bb) = blind_positions(dealer, table.seats.len());

    let sb_paid = table.seats[sb].commit(table.options.small_blind);
    let bb_paid = table.seats[bb].commit(table.options.big_blind);

    table.history.push(HandEventKind::HandStarted {
        hand_id: table.hand_id,
        dealer,
        small_blind: (table.seats[sb].player_id.clone(), sb_paid),
        big_blind: (table.seats[bb].player_id.clone(), bb_paid),
    });

    // По одной карте каждому, два круга.
    for _round in 0..2 {
        for p in table.seats.iter_mut() {
            if let Some(card) = table.deck.draw_one() {
                p.hole_cards.push(card);
            }
        }
    }
    for p in &table.seats {
        table.history.push(HandEventKind::HoleCardsDealt {
            player_id: p.player_id.clone(),
            cards: p.hole_cards.clone(),
        });
    }

    table.last_raiser = Some(table.seats[bb].player_id.clone());
    table.street = Street::Preflop;

    log::info!(
        "table {}: hand #{} started, dealer {}, blinds {}/{}",
        table.id,
        table.hand_id,
        table.seats[dealer].player_id,
        sb_paid,
        bb_paid
    );

    match first_active_from(table, (bb + 1) % table.seats.len()) {
        Some(idx) => {
            table.current_player = Some(idx);
            HandStatus::Ongoing
        }
        // Блайнды забрали все стеки – ходить некому.
        None => HandStatus::Finished(determine_winners(table)),
    }
}

// ---------- действия ----------

/// Применить действие игрока. Сначала всё проверяем, потом меняем стол:
/// при ошибке стол остаётся нетронутым.
pub fn apply_action(table: &mut Table, action: PlayerAction) -> Result<HandStatus, EngineError> {
    if !table.in_progress {
        return Err(EngineError::NoHandInProgress);
    }
    if table.street == Street::Showdown {
        return Err(EngineError::HandOver);
    }

    let idx = table
        .seat_index(&action.player_id)
        .ok_or_else(|| EngineError::PlayerNotAtTable(action.player_id.clone()))?;
    if table.current_player != Some(idx) || !table.seats[idx].is_active() {
        return Err(EngineError::NotYourTurn(action.player_id));
    }

    let highest = table.highest_bet();
    let amount = validate_action(&table.seats[idx], &action.kind, highest, table.options.big_blind)?;

    let seat = &mut table.seats[idx];
    match action.kind {
        PlayerActionKind::Fold => seat.status = PlayerStatus::Folded,
        PlayerActionKind::Check => {}
        PlayerActionKind::Call => {
            seat.commit(amount);
        }
        PlayerActionKind::Raise(_) => {
            seat.commit(amount);
            table.last_raiser = Some(action.player_id.clone());
        }
    }

    let seat = &mut table.seats[idx];
    seat.has_acted = true;
    let new_stack = seat.stack;

    log::debug!(
        "table {}: {} {} (stack {})",
        table.id,
        action.player_id,
        action.kind,
        new_stack
    );
    let pot_after = table.pot_with_bets();
    table.history.push(HandEventKind::PlayerActed {
        player_id: action.player_id,
        action: action.kind,
        new_stack,
        pot_after,
    });

    if table.contenders_count() <= 1 || is_round_complete(table) {
        Ok(advance_to_next_state(table))
    } else {
        Ok(move_to_next_player(table))
    }
}

/// Закрыть улицу: смести ставки в банк и открыть следующую улицу
/// (или уйти на шоудаун).
pub fn advance_to_next_state(table: &mut Table) -> HandStatus {
    sweep_bets(table);

    if table.contenders_count() <= 1 || table.active_count() == 0 {
        return HandStatus::Finished(determine_winners(table));
    }

    match table.street {
        Street::Preflop | Street::Flop | Street::Turn => {
            let next = table.street.next();
            deal_street(table, next);
            table.street = next;
        }
        _ => return HandStatus::Finished(determine_winners(table)),
    }

    // На постфлопе первым ходит первый активный слева от кнопки.
    let start = table.dealer_index.map_or(0, |d| d + 1) % table.seats.len();
    match first_active_from(table, start) {
        Some(idx) => {
            table.current_player = Some(idx);
            table.last_raiser = None;
            HandStatus::Ongoing
        }
        None => force_showdown(table),
    }
}

/// Передать ход следующему активному игроку.
///
/// Перебор ограничен двумя кругами; если активного не нашлось,
/// раздача принудительно идёт на шоудаун.
pub fn move_to_next_player(table: &mut Table) -> HandStatus {
    let n = table.seats.len();
    let mut idx: SeatIndex = table
        .current_player
        .or(table.dealer_index)
        .unwrap_or(0);

    for _attempt in 0..n * 2 {
        idx = (idx + 1) % n;
        if table.seats[idx].is_active() {
            table.current_player = Some(idx);
            return HandStatus::Ongoing;
        }
    }

    force_showdown(table)
}

fn force_showdown(table: &mut Table) -> HandStatus {
    log::error!(
        "table {}: no seat can act in hand #{} on {}, forcing showdown",
        table.id,
        table.hand_id,
        table.street
    );
    table.history.push(HandEventKind::ForcedShowdown);
    HandStatus::Finished(determine_winners(table))
}

// ---------- борд ----------

/// Сжечь карту и открыть карты улицы.
fn deal_street(table: &mut Table, street: Street) {
    let _burned = table.deck.burn();
    let cards = table.deck.draw_n(street.cards_dealt());
    table.board.extend(cards.iter().copied());

    log::info!(
        "table {}: {} {}",
        table.id,
        street,
        cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
    );
    table.history.push(HandEventKind::BoardDealt { street, cards });
}

/// Доложить борд до пяти карт (все в олл-ине или аварийный шоудаун).
fn run_out_board(table: &mut Table) {
    while table.board.len() < 5 {
        let before = table.board.len();
        let street = match before {
            0..=2 => Street::Flop,
            3 => Street::Turn,
            _ => Street::River,
        };
        if street == Street::Flop && before > 0 {
            // Недоданный флоп: добираем только недостающие карты.
            let _burned = table.deck.burn();
            let cards = table.deck.draw_n(3 - before);
            table.board.extend(cards.iter().copied());
            table.history.push(HandEventKind::BoardDealt { street, cards });
        } else {
            deal_street(table, street);
        }
        if table.board.len() == before {
            break;
        }
    }
}

// ---------- шоудаун ----------

/// Определить победителей и раздать банк.
///
/// Один претендент забирает всё без вскрытия. Иначе руки оцениваются
/// по 7 картам, банк делится нацело между лучшими (остаток сгорает).
pub fn determine_winners(table: &mut Table) -> HandSummary {
    sweep_bets(table);

    let contenders: Vec<SeatIndex> = (0..table.seats.len())
        .filter(|&i| table.seats[i].is_contender())
        .collect();
    let total_pot = table.pot;

    let mut payouts: Vec<Payout> = Vec::new();
    let mut remainder = Chips::ZERO;
    let uncontested = contenders.len() <= 1;

    match contenders.as_slice() {
        [] => remainder = total_pot,
        [only] => {
            let winner = &mut table.seats[*only];
            winner.stack += total_pot;
            winner.is_winner = true;
            winner.showdown = Some(ShowdownResult::Uncontested);
            payouts.push(Payout {
                player_id: winner.player_id.clone(),
                amount: total_pot,
                hand: None,
            });
        }
        _ => {
            run_out_board(table);

            let mut hands: Vec<(PlayerId, EvaluatedHand)> = Vec::new();
            for &i in &contenders {
                let p = &mut table.seats[i];
                if let Some(hand) = evaluate_best_hand(&p.hole_cards, &table.board) {
                    p.showdown = Some(ShowdownResult::Evaluated(hand.clone()));
                    table.history.push(HandEventKind::ShowdownReveal {
                        player_id: p.player_id.clone(),
                        hole_cards: p.hole_cards.clone(),
                        hand: hand.clone(),
                    });
                    hands.push((p.player_id.clone(), hand));
                }
            }

            let awards = match table.options.pot_mode {
                PotMode::Shared => vec![award_to_best(total_pot, &hands, None)],
                PotMode::SidePots => {
                    let ids: BTreeSet<PlayerId> = hands.iter().map(|(id, _)| id.clone()).collect();
                    let pots = compute_side_pots(&table.contributions, &ids);
                    if pots.is_empty() {
                        vec![award_to_best(total_pot, &hands, None)]
                    } else {
                        pots.iter()
                            .map(|sp| award_to_best(sp.amount, &hands, Some(&sp.eligible)))
                            .collect()
                    }
                }
            };

            for award in &awards {
                remainder += award.remainder;
                for winner_id in &award.winners {
                    let hand = hands
                        .iter()
                        .find(|(id, _)| id == winner_id)
                        .map(|(_, h)| h.clone());
                    if let Some(seat) = table.seats.iter_mut().find(|p| &p.player_id == winner_id) {
                        seat.stack += award.share;
                        seat.is_winner = true;
                    }
                    match payouts.iter_mut().find(|p| &p.player_id == winner_id) {
                        Some(existing) => existing.amount += award.share,
                        None => payouts.push(Payout {
                            player_id: winner_id.clone(),
                            amount: award.share,
                            hand,
                        }),
                    }
                }
            }
        }
    }

    for payout in &payouts {
        table.history.push(HandEventKind::PotAwarded {
            player_id: payout.player_id.clone(),
            amount: payout.amount,
        });
    }
    table.history.push(HandEventKind::HandFinished {
        hand_id: table.hand_id,
    });

    table.street = Street::Showdown;
    table.current_player = None;
    table.last_raiser = None;
    table.pot = Chips::ZERO;

    let summary = HandSummary {
        hand_id: table.hand_id,
        table_id: table.id.clone(),
        board: table.board.clone(),
        total_pot,
        payouts,
        remainder,
        uncontested,
    };

    log::info!(
        "table {}: hand #{} finished, pot {} to [{}]{}",
        table.id,
        table.hand_id,
        total_pot,
        summary.winners().cloned().collect::<Vec<_>>().join(", "),
        if remainder.is_zero() {
            String::new()
        } else {
            format!(", {} lost to rounding", remainder)
        }
    );

    table.last_summary = Some(summary.clone());
    summary
}

/// Отдать `amount` лучшей руке (или поровну нескольким равным),
/// выбирая только из `eligible`, если он задан.
fn award_to_best(
    amount: Chips,
    hands: &[(PlayerId, EvaluatedHand)],
    eligible: Option<&Vec<PlayerId>>,
) -> PotAward {
    let candidates = hands
        .iter()
        .filter(|(id, _)| eligible.map_or(true, |e| e.contains(id)));

    let best = candidates.clone().map(|(_, h)| h).max();
    let winners = match best {
        Some(best) => candidates
            .filter(|(_, h)| h == best)
            .map(|(id, _)| id.clone())
            .collect(),
        None => Vec::new(),
    };

    PotAward::split_evenly(amount, winners)
}
