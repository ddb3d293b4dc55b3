//! 测试套件

mod athlete_journey;
mod manual_badges;
