pub mod configuration;

pub mod display {
    pub mod displaysink;
    pub mod clockpanel;
    pub mod holidaypanel;
    pub mod dashboard;
}

pub mod holiday {
    pub mod holidaytable;
    pub mod holidaycalculator;
}

pub mod locale {
    pub mod ptbr;
}

pub mod logging {
    pub mod minimaltracer;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod scheduler {
    pub mod scheduler;
}

pub mod theme {
    pub mod theme;
    pub mod preferencestore;
}

pub mod time {
    pub mod utility;
    pub mod timesource;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod fixeddateholiday;
        pub mod easterrelatedholiday;
    }

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod holidaycalendarmanager;
    }
}
