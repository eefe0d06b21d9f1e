//! In-memory [`PersonaStore`] used by the handler tests.

use std::sync::Mutex;

use crate::{
  Error,
  persona::{Persona, PersonaId, PersonaProfile, RowVersion},
  store::{PersonaStats, PersonaStore},
};

#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
  rows:        Vec<Persona>,
  next_id:     PersonaId,
  stamp:       u8,
  writes:      usize,
  lose_writes: bool,
  hide_stats:  bool,
}

impl Inner {
  fn next_version(&mut self) -> RowVersion {
    self.stamp = self.stamp.wrapping_add(1);
    RowVersion::from_bytes(vec![self.stamp])
  }

  fn email_taken(&self, email: &str, except: Option<PersonaId>) -> bool {
    self
      .rows
      .iter()
      .any(|p| p.profile().email == email && Some(p.id()) != except)
  }
}

impl MemoryStore {
  pub fn get(&self, id: PersonaId) -> Option<Persona> {
    let inner = self.inner.lock().unwrap();
    inner.rows.iter().find(|p| p.id() == id).cloned()
  }

  /// Number of successful insert/update statements.
  pub fn writes(&self) -> usize { self.inner.lock().unwrap().writes }

  /// Make subsequent updates report zero affected rows.
  pub fn lose_writes(&self) { self.inner.lock().unwrap().lose_writes = true; }

  /// Make the aggregate report no row.
  pub fn hide_stats(&self) { self.inner.lock().unwrap().hide_stats = true; }

  fn write(
    &self,
    persona: &Persona,
    apply: impl FnOnce(&Persona, &Persona) -> (PersonaProfile, bool),
  ) -> Result<usize, Error> {
    let mut inner = self.inner.lock().unwrap();
    if inner.lose_writes {
      return Ok(0);
    }
    let version = inner.next_version();
    let Some(slot) = inner.rows.iter_mut().find(|p| p.id() == persona.id()) else {
      return Ok(0);
    };
    let (profile, active) = apply(slot, persona);
    *slot = Persona::restore(persona.id(), profile, active, version);
    inner.writes += 1;
    Ok(1)
  }
}

impl PersonaStore for MemoryStore {
  type Error = Error;

  async fn find_by_id(&self, id: PersonaId) -> Result<Option<Persona>, Error> {
    Ok(self.get(id))
  }

  async fn add(&self, profile: PersonaProfile) -> Result<Persona, Error> {
    let mut inner = self.inner.lock().unwrap();
    if inner.email_taken(&profile.email, None) {
      return Err(Error::DuplicateEmail(profile.email));
    }
    inner.next_id += 1;
    let version = inner.next_version();
    let persona = Persona::restore(inner.next_id, profile, true, version);
    inner.rows.push(persona.clone());
    inner.writes += 1;
    Ok(persona)
  }

  async fn list_all(&self) -> Result<Vec<Persona>, Error> {
    Ok(self.inner.lock().unwrap().rows.clone())
  }

  async fn save_profile(&self, persona: &Persona) -> Result<usize, Error> {
    let email = &persona.profile().email;
    if self.inner.lock().unwrap().email_taken(email, Some(persona.id())) {
      return Err(Error::DuplicateEmail(email.clone()));
    }
    self.write(persona, |stored, changed| {
      let mut profile = changed.profile().clone();
      profile.gender = stored.profile().gender.clone();
      profile.birth_date = stored.profile().birth_date;
      (profile, stored.is_active())
    })
  }

  async fn save_status(&self, persona: &Persona) -> Result<usize, Error> {
    self.write(persona, |stored, changed| {
      (stored.profile().clone(), changed.is_active())
    })
  }

  async fn aggregate_stats(&self) -> Result<Option<PersonaStats>, Error> {
    let inner = self.inner.lock().unwrap();
    if inner.hide_stats {
      return Ok(None);
    }
    let total = inner.rows.len() as i64;
    let active = inner.rows.iter().filter(|p| p.is_active()).count() as i64;
    Ok(Some(PersonaStats { total, active, inactive: total - active }))
  }
}

mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn profile(email: &str) -> PersonaProfile {
    PersonaProfile {
      first_name:     "Ana".into(),
      last_name:      "Mora".into(),
      birth_date:     NaiveDate::from_ymd_opt(1985, 5, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap(),
      email:          email.into(),
      phone:          String::new(),
      address:        String::new(),
      gender:         "Femenino".into(),
      marital_status: String::new(),
    }
  }

  #[tokio::test]
  async fn save_status_ignores_the_email_it_carries() {
    let store = MemoryStore::default();
    store.add(profile("a@t.com")).await.unwrap();
    let b = store.add(profile("b@t.com")).await.unwrap();

    // Email edited in memory but only the status is persisted.
    let mut changed = b.clone();
    changed.update_profile(
      "Ana".into(),
      "Mora".into(),
      "a@t.com".into(),
      String::new(),
      String::new(),
      String::new(),
    );
    changed.deactivate();

    assert_eq!(store.save_status(&changed).await.unwrap(), 1);
    let stored = store.get(b.id()).unwrap();
    assert!(!stored.is_active());
    assert_eq!(stored.profile().email, "b@t.com");

    let err = store.save_profile(&changed).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateEmail(_)));
  }
}
