//! The settings store: owner of the session's [`QrSettings`].

use std::fmt;

use crate::types::{QrSettings, SettingsPatch};

/// Callback invoked after every applied patch.
type Subscriber = Box<dyn FnMut(&QrSettings, &SettingsPatch)>;

/// Identifies a subscription for [`SettingsStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the one configuration record of a session.
///
/// The record is only mutated through [`apply`](Self::apply), which
/// merges a partial update and then calls every subscriber
/// synchronously, in subscription order. No validation is performed.
pub struct SettingsStore {
    settings: QrSettings,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl SettingsStore {
    /// A store holding the default record.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(QrSettings::default())
    }

    /// A store holding `settings`.
    #[must_use]
    pub const fn with_settings(settings: QrSettings) -> Self {
        Self {
            settings,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current record.
    #[must_use]
    pub const fn settings(&self) -> &QrSettings {
        &self.settings
    }

    /// Merge `patch` into the record and notify subscribers.
    ///
    /// Fields not named by the patch are left untouched. An empty patch
    /// still notifies.
    pub fn apply(&mut self, patch: SettingsPatch) {
        tracing::debug!(fields = ?patch.field_names(), "applying settings patch");
        patch.merge_into(&mut self.settings);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.settings, &patch);
        }
    }

    /// Register a callback run after every [`apply`](Self::apply).
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&QrSettings, &SettingsPatch) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::{Level, LogoFile};

    #[test]
    fn new_store_holds_defaults() {
        let store = SettingsStore::new();
        assert_eq!(store.settings(), &QrSettings::default());
    }

    #[test]
    fn apply_changes_exactly_the_named_fields() {
        let patches = [
            SettingsPatch::new().with_text("abc"),
            SettingsPatch::new().with_size(640),
            SettingsPatch::new().with_fg_color("#123456"),
            SettingsPatch::new().with_bg_color("#abcdef"),
            SettingsPatch::new().with_level(Level::Q),
            SettingsPatch::new().with_include_margin(false),
            SettingsPatch::new().with_logo_file(Some(LogoFile::new("a.png", "image/png", vec![]))),
            SettingsPatch::new().with_logo_size(80),
        ];

        for patch in patches {
            let mut store = SettingsStore::new();
            let before = store.settings().clone();
            let mut expected = before.clone();
            patch.merge_into(&mut expected);

            let names = patch.field_names();
            store.apply(patch);
            let after = store.settings();

            assert_eq!(after, &expected, "patch {names:?}");
            assert_eq!(
                after.text != before.text,
                names.contains(&"text"),
                "text changed unexpectedly for {names:?}"
            );
            assert_eq!(
                after.size != before.size,
                names.contains(&"size"),
                "size changed unexpectedly for {names:?}"
            );
            assert_eq!(
                after.logo_file != before.logo_file,
                names.contains(&"logo_file"),
                "logo changed unexpectedly for {names:?}"
            );
        }
    }

    #[test]
    fn sequential_patches_accumulate() {
        let mut store = SettingsStore::new();
        store.apply(SettingsPatch::new().with_text("one"));
        store.apply(SettingsPatch::new().with_size(400));
        store.apply(SettingsPatch::new().with_text("two"));

        assert_eq!(store.settings().text, "two");
        assert_eq!(store.settings().size, 400);
        assert_eq!(store.settings().level, Level::H);
    }

    #[test]
    fn subscribers_see_new_record_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = SettingsStore::new();
        {
            let seen = Rc::clone(&seen);
            store.subscribe(move |settings, patch| {
                seen.borrow_mut().push((settings.size, patch.field_names()));
            });
        }

        store.apply(SettingsPatch::new().with_size(250));
        assert_eq!(*seen.borrow(), vec![(250, vec!["size"])]);

        store.apply(SettingsPatch::new().with_text("x"));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], (250, vec!["text"]));
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut store = SettingsStore::new();
        for n in 0..3 {
            let order = Rc::clone(&order);
            store.subscribe(move |_, _| order.borrow_mut().push(n));
        }
        store.apply(SettingsPatch::new());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribed_callback_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = SettingsStore::new();
        let id = {
            let calls = Rc::clone(&calls);
            store.subscribe(move |_, _| *calls.borrow_mut() += 1)
        };

        store.apply(SettingsPatch::new().with_size(200));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.apply(SettingsPatch::new().with_size(210));

        assert_eq!(*calls.borrow(), 1);
    }
}
