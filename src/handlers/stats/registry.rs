//! STATS category registry.
//!
//! Maps each category letter to its renderer and the privilege it needs.
//! Upper and lower case are distinct letters; several pairs share a renderer.

use super::conf::{
    AuthReport, ClassReport, ConnectReport, DlineReport, ExemptReport, GecosReport,
    HubLeafReport, KlineReport, OperReport, ResvReport, ServiceReport, SharedReport,
};
use super::ltrace::LinkTraceReport;
use super::memory::MemoryReport;
use super::runtime::{
    DnsReport, EventReport, FdReport, MessageReport, MotdReport, OperedUpReport, PortReport,
    ServLinksReport, ServerReport, TrafficReport, UptimeReport,
};
use super::{Privilege, StatsReport};
use std::sync::OnceLock;

/// One category: its letter, renderer and required privilege.
pub struct StatsEntry {
    pub letter: char,
    pub report: &'static dyn StatsReport,
    pub required: Privilege,
}

const fn entry(letter: char, report: &'static dyn StatsReport, required: Privilege) -> StatsEntry {
    StatsEntry {
        letter,
        report,
        required,
    }
}

static ENTRIES: &[StatsEntry] = &[
    entry('a', &DnsReport, Privilege::Admin),
    entry('A', &DnsReport, Privilege::Admin),
    entry('c', &ConnectReport, Privilege::Oper),
    entry('C', &ConnectReport, Privilege::Oper),
    entry('d', &DlineReport::TEMPORARY, Privilege::Oper),
    entry('D', &DlineReport::PERMANENT, Privilege::Oper),
    entry('e', &ExemptReport, Privilege::Oper),
    entry('E', &EventReport, Privilege::Admin),
    entry('f', &FdReport, Privilege::Admin),
    entry('F', &FdReport, Privilege::Admin),
    entry('h', &HubLeafReport, Privilege::Oper),
    entry('H', &HubLeafReport, Privilege::Oper),
    entry('i', &AuthReport, Privilege::None),
    entry('I', &AuthReport, Privilege::None),
    entry('k', &KlineReport::TEMPORARY, Privilege::None),
    entry('K', &KlineReport::PERMANENT, Privilege::None),
    entry('l', &LinkTraceReport::HIDE_IP, Privilege::Oper),
    entry('L', &LinkTraceReport::SHOW_IP, Privilege::Oper),
    entry('m', &MessageReport, Privilege::None),
    entry('M', &MessageReport, Privilege::None),
    entry('o', &OperReport, Privilege::None),
    entry('O', &OperReport, Privilege::None),
    entry('p', &OperedUpReport, Privilege::None),
    entry('P', &PortReport, Privilege::None),
    entry('q', &ResvReport, Privilege::Oper),
    entry('Q', &ResvReport, Privilege::Oper),
    entry('s', &ServiceReport, Privilege::Oper),
    entry('S', &ServiceReport, Privilege::Oper),
    entry('t', &TrafficReport, Privilege::Oper),
    entry('T', &MotdReport, Privilege::Oper),
    entry('u', &UptimeReport, Privilege::None),
    entry('U', &SharedReport, Privilege::Oper),
    entry('v', &ServerReport, Privilege::Oper),
    entry('x', &GecosReport, Privilege::Oper),
    entry('X', &GecosReport, Privilege::Oper),
    entry('y', &ClassReport, Privilege::Oper),
    entry('Y', &ClassReport, Privilege::Oper),
    entry('z', &MemoryReport, Privilege::Oper),
    entry('?', &ServLinksReport, Privilege::None),
];

static TABLE: OnceLock<[Option<&'static StatsEntry>; 256]> = OnceLock::new();

fn table() -> &'static [Option<&'static StatsEntry>; 256] {
    TABLE.get_or_init(|| {
        let mut table = [None; 256];
        for e in ENTRIES {
            table[e.letter as usize] = Some(e);
        }
        table
    })
}

/// Entry for `letter`, if it names a category.
pub fn resolve(letter: char) -> Option<&'static StatsEntry> {
    let index = usize::try_from(u32::from(letter)).ok()?;
    table().get(index).copied().flatten()
}

/// All registered categories, in table order.
pub fn entries() -> &'static [StatsEntry] {
    ENTRIES
}
