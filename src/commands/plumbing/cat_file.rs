use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn cat_file(&mut self, name: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(name.to_string())?;
        let (payload, _) = self.database().get_object(&oid)?;

        writeln!(self.writer(), "{}", String::from_utf8_lossy(&payload))?;
        Ok(())
    }
}
